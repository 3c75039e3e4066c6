use maud::{html, Markup};

use crate::web::{
    sessions::AuthUser,
    templates::{components::header::Header, page::Page},
};

pub(crate) struct SignupPage {
    pub(crate) user: Option<AuthUser>,
}

impl Page for SignupPage {
    fn get_name(&'_ self) -> String {
        "Sign up".to_string()
    }

    fn get_description(&'_ self) -> Option<String> {
        Some("Create a citizen account to file complaints".to_string())
    }

    fn draw_body(&self) -> Markup {
        html! {
            (Header {
                user: self.user.as_ref(),
            })
            div class="container" {
                div class="main-content" {
                    div class="content-well form-well" {
                        span class="content-title" { "Create an account" }
                        form method="post" action="/signup" {
                            label for="username" { "Username" }
                            input type="text" id="username" name="username";
                            label for="password" { "Password" }
                            input type="password" id="password" name="password";
                            input type="submit" class="btn" value="Sign up";
                        }
                        span class="form-hint" {
                            "Already registered? "
                            a href="/" { "Login" }
                        }
                    }
                }
            }
        }
    }
}
