use maud::{Markup, html};

use super::page_header;
use crate::models::Role;
use crate::routes::descriptor::Params;

pub fn users(_params: &Params) -> Markup {
    page_header("Usuarios", "Cuentas con acceso al CRM")
}

pub fn roles(_params: &Params) -> Markup {
    html! {
        (page_header("Roles", "Permisos por rol"))
        ul {
            @for role in Role::ALL {
                li { (role.as_str()) }
            }
        }
    }
}
