use maud::{html, Render};

pub(crate) struct Footer {}

impl Render for Footer {
    fn render(&self) -> maud::Markup {
        html! {
            footer class="flex-row flex-space" {
                span { "Soapbox keeps civic complaints moving." }
                span class="footer-note" {
                    "Questions about a filing? Your municipality's service desk can help."
                }
            }
        }
    }
}
