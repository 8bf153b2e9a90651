use maud::{Markup, html};

use super::{page_header, param};
use crate::routes::descriptor::Params;

const STAGES: [&str; 7] = [
    "new",
    "contacted",
    "qualified",
    "proposal",
    "negotiation",
    "won",
    "lost",
];

pub fn list(_params: &Params) -> Markup {
    html! {
        (page_header("Leads", "Embudo de ventas"))
        ol class="pipeline" {
            @for stage in STAGES {
                li data-stage=(stage) { (stage) }
            }
        }
    }
}

pub fn detail(params: &Params) -> Markup {
    html! {
        (page_header("Lead", "Detalle de oportunidad"))
        p { "Identificador: " code { (param(params, "id")) } }
        a href="/leads" { "Volver a leads" }
    }
}
