use maud::{html, Render};

/// Document head shared by every page. Titles come out as "{page} - Soapbox"
/// so stacked browser tabs stay tellable apart.
pub(crate) struct HtmlHead<'a> {
    pub(crate) title: &'a str,
    pub(crate) description: Option<&'a str>,
}

impl<'a> Render for HtmlHead<'a> {
    fn render(&self) -> maud::Markup {
        html! {
          head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            meta name="theme-color" content="#1b1e24";
            @if let Some(description) = self.description {
                meta name="description" content=(description);
            }
            title { (self.title) " - Soapbox" }
            link rel="stylesheet" href="/static/main.css";
          }
        }
    }
}
