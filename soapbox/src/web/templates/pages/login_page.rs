use maud::{html, Markup};

use crate::web::{
    sessions::AuthUser,
    templates::{components::header::Header, page::Page},
};

pub(crate) struct LoginPage {
    pub(crate) user: Option<AuthUser>,
    /// Set after a rejected login attempt so the form can say so.
    pub(crate) failed: bool,
}

impl Page for LoginPage {
    fn get_name(&'_ self) -> String {
        "Login".to_string()
    }

    fn get_description(&'_ self) -> Option<String> {
        Some("Sign in to file and track civic complaints".to_string())
    }

    fn draw_body(&self) -> Markup {
        html! {
            (Header {
                user: self.user.as_ref(),
            })
            div class="container" {
                div class="main-content" {
                    div class="content-well form-well" {
                        span class="content-title" { "Login" }
                        @if self.failed {
                            div class="form-error" { "Invalid username or password" }
                        }
                        form method="post" action="/" {
                            label for="username" { "Username" }
                            input type="text" id="username" name="username";
                            label for="password" { "Password" }
                            input type="password" id="password" name="password";
                            input type="submit" class="btn" value="Login";
                        }
                        span class="form-hint" {
                            "No account yet? "
                            a href="/signup" { "Sign up" }
                        }
                    }
                }
            }
        }
    }
}
