use core::ops::ControlFlow;

use chtml::{
    class::Class,
    diagnostic::{Diagnostic, DiagnosticKind},
    event::{owned::OwnedEvent, Event, Kind, Span},
    visit::Events,
    Outcome, ParseOptions, Parser, Visitor,
};

const SIMPLE_1_HTML: &str = include_str!("../tests/resources/simple-1.html");
const PAGE_1_HTML: &str = include_str!("../tests/resources/page-1.html");
const MALFORMED_1_HTML: &str = include_str!("../tests/resources/malformed-1.html");

#[derive(Debug, Default, PartialEq, Eq)]
struct Counts {
    tag_enter: usize,
    tag_exit: usize,
    attribute: usize,
    other: usize,
    closing: usize,
    self_closing: usize,
    valued: usize,
}

impl<'a> Visitor<'a> for Counts {
    fn event(&mut self, event: Event<'a>) -> ControlFlow<()> {
        match event.kind() {
            Kind::TagEnter => {
                self.tag_enter += 1;
                if event.is_closing_tag() {
                    self.closing += 1;
                }
            }
            Kind::TagExit => {
                self.tag_exit += 1;
                if event.is_self_closing() {
                    self.self_closing += 1;
                }
            }
            Kind::Attribute => {
                self.attribute += 1;
                if event.attribute_value().is_some() {
                    self.valued += 1;
                }
            }
            Kind::Other => self.other += 1,
        }
        ControlFlow::Continue(())
    }
}

fn count(input: &str, opts: ParseOptions) -> Counts {
    let mut counts = Counts::default();
    let outcome = Parser::new(input).with_options(opts).parse(&mut counts);
    assert_eq!(Outcome::Finished, outcome);
    counts
}

fn collect_with(input: &str, opts: ParseOptions) -> Events<'_> {
    let mut events = Events::new();
    let outcome = Parser::new(input).with_options(opts).parse(&mut events);
    assert_eq!(Outcome::Finished, outcome);
    events
}

fn assert_lossless(input: &str, events: &Events<'_>) {
    let mut offset = 0;
    let mut bytes = Vec::with_capacity(input.len());
    for event in events {
        assert_eq!(offset, event.offset());
        assert!(!event.span().is_empty());
        bytes.extend_from_slice(event.as_bytes());
        offset = event.span().end();
    }
    assert_eq!(input.len(), offset);
    assert_eq!(input.as_bytes(), bytes.as_slice());

    // Text runs are never split
    for pair in events.events().windows(2) {
        assert!(
            pair[0].kind() != Kind::Other || pair[1].kind() != Kind::Other,
            "adjacent other events at {}",
            pair[1].offset()
        );
    }
}

fn names<'a>(events: &'a Events<'a>) -> Vec<(&'a str, Option<&'a str>)> {
    events
        .iter()
        .filter(|e| e.kind() == Kind::Attribute)
        .map(|e| {
            (
                core::str::from_utf8(e.attribute_name().unwrap()).unwrap(),
                e.attribute_value()
                    .map(|v| core::str::from_utf8(v).unwrap()),
            )
        })
        .collect()
}

#[test]
fn simple_1_html() {
    let events = chtml::collect_str(SIMPLE_1_HTML);
    assert_lossless(SIMPLE_1_HTML, &events);
    assert!(events.diagnostics().is_empty());

    assert_eq!(
        vec![
            ("class", Some("main")),
            ("data-id", Some("7")),
            ("src", Some("a.png")),
            ("alt", Some("An image")),
            ("hidden", None),
        ],
        names(&events)
    );

    let tags = events
        .iter()
        .filter(|e| e.kind() == Kind::TagEnter)
        .map(|e| e.tag().unwrap())
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            &b"html"[..],
            &b"head"[..],
            &b"title"[..],
            &b"/title"[..],
            &b"/head"[..],
            &b"body"[..],
            &b"p"[..],
            &b"br"[..],
            &b"/p"[..],
            &b"img"[..],
            &b"/body"[..],
            &b"/html"[..],
        ],
        tags
    );

    assert_eq!(
        Counts {
            tag_enter: 12,
            tag_exit: 12,
            attribute: 5,
            other: 10,
            closing: 5,
            self_closing: 1,
            valued: 4,
        },
        count(SIMPLE_1_HTML, ParseOptions::new())
    );
}

#[test]
fn simple_1_html_first_events() {
    let events = chtml::collect_str(SIMPLE_1_HTML);
    let first = events
        .iter()
        .take(8)
        .map(|e| (e.kind(), e.to_str().unwrap()))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            (Kind::TagEnter, "<html"),
            (Kind::TagExit, ">"),
            (Kind::Other, "\n"),
            (Kind::TagEnter, "<head"),
            (Kind::TagExit, ">"),
            (Kind::TagEnter, "<title"),
            (Kind::TagExit, ">"),
            (Kind::Other, "Simple"),
        ],
        first
    );
}

#[test]
fn page_1_html() {
    let events = chtml::collect_str(PAGE_1_HTML);
    assert_lossless(PAGE_1_HTML, &events);

    // `1 < 2` in the text
    assert_eq!(1, events.diagnostics().len());
    let diagnostic = events.diagnostics()[0];
    assert_eq!(DiagnosticKind::MissingTagName, diagnostic.kind());
    assert_eq!(b"<", diagnostic.span().slice(PAGE_1_HTML.as_bytes()));

    assert_eq!(
        Counts {
            tag_enter: 51,
            tag_exit: 51,
            attribute: 25,
            other: 42,
            closing: 22,
            self_closing: 4,
            valued: 20,
        },
        count(PAGE_1_HTML, ParseOptions::new())
    );

    let attrs = names(&events);
    assert!(attrs.contains(&("content", Some("width=device-width, initial-scale=1"))));
    assert!(attrs.contains(&("href", Some("/blog"))));
    assert!(attrs.contains(&("href", Some("/static/site.css"))));
    assert!(attrs.contains(&("class", Some("site-header"))));
    assert!(attrs.contains(&("required", None)));
    assert!(attrs.contains(&("defer", None)));
}

#[test]
fn page_1_html_doctype_is_a_tag() {
    let events = chtml::collect_str(PAGE_1_HTML);
    let e = events.events();
    assert_eq!(Kind::TagEnter, e[0].kind());
    assert_eq!(Some(&b"!DOCTYPE"[..]), e[0].tag());
    assert_eq!(Some(&b"html"[..]), e[1].attribute_name());
    assert_eq!(None, e[1].attribute_value());
    assert_eq!(Kind::TagExit, e[2].kind());
}

#[test]
fn malformed_1_html() {
    let events = chtml::collect_str(MALFORMED_1_HTML);
    assert_lossless(MALFORMED_1_HTML, &events);

    let diagnostics = events
        .diagnostics()
        .iter()
        .map(|d| (d.kind(), d.span()))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            (DiagnosticKind::BracketInQuotedValue, Span::new(33, 15)),
            (DiagnosticKind::MissingTagName, Span::new(83, 1)),
            (DiagnosticKind::BracketInQuotedValue, Span::new(107, 18)),
            (DiagnosticKind::DetachedClosingSlash, Span::new(138, 2)),
            (
                DiagnosticKind::MissingAttributeValue(Class::CloseBracket),
                Span::new(144, 10)
            ),
        ],
        diagnostics
    );

    assert_eq!(
        Counts {
            tag_enter: 13,
            tag_exit: 10,
            attribute: 2,
            other: 13,
            closing: 6,
            self_closing: 1,
            valued: 2,
        },
        count(MALFORMED_1_HTML, ParseOptions::new())
    );
}

#[test]
fn malformed_1_html_brackets_in_quoted_values() {
    let opts = ParseOptions::new().brackets_in_quoted_values(true);
    let events = collect_with(MALFORMED_1_HTML, opts);
    assert_lossless(MALFORMED_1_HTML, &events);

    let kinds = events
        .diagnostics()
        .iter()
        .map(Diagnostic::kind)
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            DiagnosticKind::DetachedClosingSlash,
            DiagnosticKind::MissingAttributeValue(Class::CloseBracket),
        ],
        kinds
    );

    // The first quoted value runs until the next `"` two lines later
    let href = events
        .iter()
        .find(|e| e.attribute_name() == Some(&b"href"[..]))
        .unwrap();
    let value = href.attribute_value().unwrap();
    assert!(value.starts_with(b"broken>link</a>\n"));
    assert!(value.ends_with(b"<img src=x alt="));

    assert_eq!(
        Counts {
            tag_enter: 8,
            tag_exit: 7,
            attribute: 2,
            other: 8,
            closing: 3,
            self_closing: 1,
            valued: 1,
        },
        count(MALFORMED_1_HTML, opts)
    );
}

#[test]
fn rejected_tags_stay_in_one_text_run() {
    for input in ["a<>b", "1 < 2 and more", "x</ p>y"] {
        let events = chtml::collect_str(input);
        assert_eq!(1, events.events().len(), "{input}");
        assert_eq!(Kind::Other, events.events()[0].kind());
        assert_eq!(input.as_bytes(), events.events()[0].as_bytes());
        assert_eq!(1, events.diagnostics().len());
    }
}

#[test]
fn self_closing_after_bare_value() {
    let events = chtml::collect_str("<img src=a.png/><a /  >");
    assert_eq!(Some(&b"a.png"[..]), events.events()[1].attribute_value());
    let self_closing = events
        .iter()
        .filter(|e| e.kind() == Kind::TagExit)
        .map(Event::is_self_closing)
        .collect::<Vec<_>>();
    assert_eq!(vec![true, false], self_closing);
}

#[test]
fn abandoned_bytes_join_the_next_other_event() {
    let input = "<a href=\"x>y</a>";
    let events = chtml::collect_str(input);
    assert_eq!(
        vec![
            (Kind::TagEnter, "<a"),
            (Kind::Other, " href=\"x>y"),
            (Kind::TagEnter, "</a"),
            (Kind::TagExit, ">"),
        ],
        events
            .iter()
            .map(|e| (e.kind(), e.to_str().unwrap()))
            .collect::<Vec<_>>()
    );
}

#[test]
fn attribute_events_carry_tag_context() {
    let events = chtml::collect_str("<a x=1><b y z=2>");
    let attrs = events
        .iter()
        .filter(|e| e.kind() == Kind::Attribute)
        .map(|e| (e.tag().unwrap(), e.attribute_name().unwrap()))
        .collect::<Vec<_>>();
    assert_eq!(
        vec![
            (&b"a"[..], &b"x"[..]),
            (&b"b"[..], &b"y"[..]),
            (&b"b"[..], &b"z"[..]),
        ],
        attrs
    );

    for e in events.iter().filter(|e| e.kind() == Kind::Other) {
        assert_eq!(None, e.tag());
        assert_eq!(None, e.attribute_name());
    }
}

#[test]
fn value_spans_exclude_quotes() {
    let input = r#"<a b="cd" e='' f=g>"#;
    let events = chtml::collect_str(input);
    let spans = events
        .iter()
        .filter_map(Event::attribute_value_span)
        .map(|s| s.range())
        .collect::<Vec<_>>();
    assert_eq!(vec![6..8, 13..13, 17..18], spans);
    assert_eq!(
        Some(Span::new(3, 1)),
        events.events()[1].attribute_name_span()
    );
}

#[test]
fn cancelled_parse_reports_prefix() {
    let mut seen = Vec::new();
    let outcome = chtml::parse_str(
        SIMPLE_1_HTML,
        &mut chtml::visit::from_fn(|event| {
            seen.push(event);
            if event.tag() == Some(&b"body"[..]) {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        }),
    );

    let Outcome::Cancelled { offset } = outcome else {
        panic!("expected cancellation, got {outcome:?}");
    };
    assert_eq!(Kind::TagEnter, seen.last().unwrap().kind());
    assert_eq!(seen.last().unwrap().span().end(), offset);

    let prefix = seen.iter().flat_map(|e| e.as_bytes()).copied().collect::<Vec<u8>>();
    assert_eq!(&SIMPLE_1_HTML.as_bytes()[..offset], prefix.as_slice());
}

#[test]
fn cancel_every_event_index() {
    let all = chtml::collect_str(PAGE_1_HTML);
    for stop in 0..all.events().len() {
        let mut n = 0;
        let outcome = chtml::parse_str(PAGE_1_HTML, &mut |_: Event<'_>| {
            n += 1;
            if n > stop {
                ControlFlow::Break(())
            } else {
                ControlFlow::Continue(())
            }
        });
        assert_eq!(stop + 1, n);
        assert_eq!(
            Outcome::Cancelled {
                offset: all.events()[stop].span().end()
            },
            outcome
        );
    }
}

#[test]
fn nul_terminated_stops_at_first_nul() {
    let mut input = SIMPLE_1_HTML.as_bytes().to_vec();
    let cut = SIMPLE_1_HTML.find("<body").unwrap();
    input.insert(cut, 0);
    input.extend_from_slice(b"<after>");

    let mut events = Events::new();
    let outcome = Parser::from_slice(&input)
        .with_options(ParseOptions::new().nul_terminated(true))
        .parse(&mut events);
    assert!(outcome.is_finished());

    let seen = events
        .iter()
        .flat_map(|e| e.as_bytes())
        .copied()
        .collect::<Vec<u8>>();
    assert_eq!(&input[..cut], seen.as_slice());
    assert!(events.iter().all(|e| e.tag() != Some(&b"after"[..])));

    let events = chtml::collect(&input);
    assert_eq!(
        input.len(),
        events.events().last().unwrap().span().end()
    );
}

#[test]
fn owned_events_match_borrowed() {
    let owned: Vec<OwnedEvent> = {
        let input = String::from(SIMPLE_1_HTML);
        chtml::collect_str(&input)
            .iter()
            .map(Event::to_owned_event)
            .collect()
    };

    let events = chtml::collect_str(SIMPLE_1_HTML);
    assert_eq!(events.events().len(), owned.len());
    for (borrowed, owned) in events.iter().zip(&owned) {
        assert_eq!(borrowed.kind(), owned.kind());
        assert_eq!(borrowed.span(), owned.span());
        assert_eq!(borrowed.as_bytes(), owned.as_bytes());
        assert_eq!(borrowed.tag(), owned.tag());
        assert_eq!(borrowed.attribute_name(), owned.attribute_name());
        assert_eq!(borrowed.attribute_value(), owned.attribute_value());
    }
}

#[test]
fn diagnostic_is_an_error() {
    let events = chtml::collect_str("<a b='c");
    let diagnostic = events.diagnostics()[0];
    let error: Box<dyn std::error::Error> = Box::new(diagnostic);
    assert_eq!(
        "unterminated quoted attribute value at bytes 0..7",
        error.to_string()
    );
}
