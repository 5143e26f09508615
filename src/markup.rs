//! Markup writer helpers for head metadata.
//!
//! All rendered output goes through a `quick_xml` writer so attribute
//! escaping stays consistent across item kinds.

use anyhow::Result;
use quick_xml::{
    Writer,
    events::{BytesEnd, BytesStart, BytesText, Event},
};
use std::io::Cursor;

pub type XmlWriter = Writer<Cursor<Vec<u8>>>;

/// Create a fresh writer backed by an in-memory buffer.
#[inline]
pub fn create_writer() -> XmlWriter {
    Writer::new(Cursor::new(Vec::new()))
}

/// Consume a writer and return the markup it produced.
pub fn into_markup(writer: XmlWriter) -> Result<String> {
    Ok(String::from_utf8(writer.into_inner().into_inner())?)
}

/// Write a text element: `<tag>text</tag>`.
#[inline]
pub fn write_text_element(writer: &mut XmlWriter, tag: &str, text: &str) -> Result<()> {
    writer.write_event(Event::Start(BytesStart::new(tag)))?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    writer.write_event(Event::End(BytesEnd::new(tag)))?;
    Ok(())
}

/// Write an empty element with attributes: `<tag attr1="val1" ... />`.
#[inline]
pub fn write_empty_elem(writer: &mut XmlWriter, tag: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let mut elem = BytesStart::new(tag);
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// Write a script element referencing an external source, with optional
/// defer/async.
pub fn write_script_src(
    writer: &mut XmlWriter,
    src: &str,
    defer: bool,
    async_attr: bool,
) -> Result<()> {
    let mut elem = BytesStart::new("script");
    elem.push_attribute(("src", src));
    if defer {
        elem.push_attribute(("defer", ""));
    }
    if async_attr {
        elem.push_attribute(("async", ""));
    }
    writer.write_event(Event::Start(elem))?;
    // Space ensures proper HTML parsing of script tags
    writer.write_event(Event::Text(BytesText::new(" ")))?;
    writer.write_event(Event::End(BytesEnd::new("script")))?;
    Ok(())
}

/// Write a script element whose body is emitted verbatim (trusted input).
///
/// Used for inline scripts and JSON-LD payloads, where entity-escaping the
/// body would corrupt it.
pub fn write_script_body(
    writer: &mut XmlWriter,
    body: &str,
    attrs: &[(&str, &str)],
) -> Result<()> {
    let mut elem = BytesStart::new("script");
    for (k, v) in attrs {
        elem.push_attribute((*k, *v));
    }
    writer.write_event(Event::Start(elem))?;
    writer.write_event(Event::Text(BytesText::from_escaped(body)))?;
    writer.write_event(Event::End(BytesEnd::new("script")))?;
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn render<F: FnOnce(&mut XmlWriter) -> Result<()>>(f: F) -> String {
        let mut writer = create_writer();
        f(&mut writer).unwrap();
        into_markup(writer).unwrap()
    }

    #[test]
    fn test_write_text_element() {
        let html = render(|w| write_text_element(w, "title", "My Page"));
        assert_eq!(html, "<title>My Page</title>");
    }

    #[test]
    fn test_write_text_element_escapes() {
        let html = render(|w| write_text_element(w, "title", "A & B <C>"));
        assert_eq!(html, "<title>A &amp; B &lt;C&gt;</title>");
    }

    #[test]
    fn test_write_empty_elem() {
        let html = render(|w| {
            write_empty_elem(w, "meta", &[("name", "description"), ("content", "hi")])
        });
        assert_eq!(html, r#"<meta name="description" content="hi"/>"#);
    }

    #[test]
    fn test_write_script_src_plain() {
        let html = render(|w| write_script_src(w, "/app.js", false, false));
        assert_eq!(html, r#"<script src="/app.js"> </script>"#);
    }

    #[test]
    fn test_write_script_src_defer() {
        let html = render(|w| write_script_src(w, "/app.js", true, false));
        assert!(html.contains(r#"defer="""#));
    }

    #[test]
    fn test_write_script_body_raw() {
        let html = render(|w| {
            write_script_body(w, r#"{"@type":"Thing"}"#, &[("type", "application/ld+json")])
        });
        assert_eq!(
            html,
            r#"<script type="application/ld+json">{"@type":"Thing"}</script>"#
        );
    }
}
