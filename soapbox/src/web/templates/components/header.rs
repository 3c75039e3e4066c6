use maud::{html, Render};
use soapbox_api_types::Role;

use crate::web::sessions::AuthUser;

pub(crate) struct Header<'a> {
    pub(crate) user: Option<&'a AuthUser>,
}

impl<'a> Render for Header<'a> {
    fn render(&self) -> maud::Markup {
        html! {
          header {
            div class="header" {
              a class="nav-item brand" href="/" {
                "Soapbox"
              };
              @match self.user {
                Some(user) => {
                    @if user.role == Role::Admin {
                        a class="nav-item" href="/operator_dashboard" {
                            "Operations"
                        };
                    } @else {
                        a class="nav-item" href="/client_dashboard" {
                            "My complaints"
                        };
                    }
                    span class="nav-item nav-user" { (user.username) };
                    a class="btn nav-item" href="/logout" {
                        "Logout"
                    }
                }
                None => {
                    a class="nav-item" href="/signup" {
                        "Sign up"
                    };
                    a class="btn nav-item" href="/" {
                        "Login"
                    }
                }
              }
            }
          }
        }
    }
}
