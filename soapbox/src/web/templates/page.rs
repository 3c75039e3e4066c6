use axum::response::{Html, IntoResponse};
use maud::{html, Markup, Render, DOCTYPE};

use super::head::HtmlHead;
use crate::web::templates::components::footer::Footer;

/// A server rendered page. Implementors only describe their body; the head,
/// footer and document shell come from [`RenderPage`].
pub(crate) trait Page {
    fn get_name(&'_ self) -> String;
    fn get_description(&'_ self) -> Option<String> {
        None
    }
    fn draw_body(&self) -> Markup;
}

pub(crate) struct RenderPage<T: Page>(pub(crate) T);

impl<T> IntoResponse for RenderPage<T>
where
    T: Page,
{
    fn into_response(self) -> axum::response::Response {
        Html(self.render().0).into_response()
    }
}

impl<T> Render for RenderPage<T>
where
    T: Page,
{
    fn render(&self) -> Markup {
        let page = &self.0;
        let name = page.get_name();
        let description = page.get_description();
        html! {
          (DOCTYPE)
          html lang="en" {
            (HtmlHead {
                title: &name,
                description: description.as_deref(),
            })
            body {
              (page.draw_body())
              ((Footer {}))
            }
          }
        }
    }
}
