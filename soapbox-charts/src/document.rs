use std::ops::Range;

/// A server rendered page on its way out the door. Post render passes use
/// [`Document::element_by_id`] to target placeholder nodes by id.
#[derive(Clone, Debug)]
pub struct Document {
    html: String,
}

impl Document {
    pub fn new(html: impl Into<String>) -> Self {
        Self { html: html.into() }
    }

    /// Finds the first element carrying `id="{id}"`. The lookup is aimed at
    /// placeholder nodes: the first closing tag after the opening tag ends the
    /// element, so ids on nodes with child elements won't resolve usefully.
    pub fn element_by_id(&self, id: &str) -> Option<Element<'_>> {
        let attr_at = self.find_id_attribute(id)?;
        let content_start = self.html[attr_at..].find('>').map(|i| attr_at + i + 1)?;
        let content_end = self.html[content_start..]
            .find("</")
            .map(|i| content_start + i)?;
        Some(Element {
            document: self,
            content: content_start..content_end,
        })
    }

    fn find_id_attribute(&self, id: &str) -> Option<usize> {
        // leading space keeps this from matching attributes like data-id
        ['"', '\''].iter().find_map(|quote| {
            let needle = format!(" id={quote}{id}{quote}");
            self.html.find(&needle)
        })
    }

    pub(crate) fn replace_range(&mut self, range: Range<usize>, content: &str) {
        self.html.replace_range(range, content);
    }

    pub fn html(&self) -> &str {
        &self.html
    }

    pub fn into_html(self) -> String {
        self.html
    }
}

pub struct Element<'a> {
    document: &'a Document,
    content: Range<usize>,
}

impl Element<'_> {
    pub fn inner_html(&self) -> &str {
        &self.document.html[self.content.clone()]
    }

    pub(crate) fn content_range(&self) -> Range<usize> {
        self.content.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_content_of_identified_element() {
        let document = Document::new("<body><div id=\"target\">inside</div></body>");
        let element = document.element_by_id("target").unwrap();
        assert_eq!(element.inner_html(), "inside");
    }

    #[test]
    fn single_quoted_attributes_work() {
        let document = Document::new("<body><div id='target'></div></body>");
        assert!(document.element_by_id("target").is_some());
    }

    #[test]
    fn absent_id_returns_none() {
        let document = Document::new("<body><p>hello</p></body>");
        assert!(document.element_by_id("target").is_none());
    }

    #[test]
    fn prefixed_attribute_names_do_not_match() {
        let document = Document::new("<body><div data-id=\"target\"></div></body>");
        assert!(document.element_by_id("target").is_none());
    }
}
