use maud::{Markup, html};

use crate::routes::descriptor::Params;

/// Login form. Posts to the session endpoint; a failed attempt comes back here with
/// `error` set in the query string.
pub fn login(params: &Params) -> Markup {
    html! {
        section class="login" {
            h1 { "CRM System" }
            @if params.contains_key("error") {
                p class="error" role="alert" { "Credenciales inválidas" }
            }
            form method="post" action="/session" {
                label { "Email" input type="email" name="email" required; }
                label { "Contraseña" input type="password" name="password" required; }
                button type="submit" { "Iniciar sesión" }
            }
        }
    }
}

pub fn not_found(_params: &Params) -> Markup {
    html! {
        section class="not-found" {
            h2 { "Página no encontrada" }
            a href="/" { "Ir al inicio" }
        }
    }
}
