use maud::{Markup, html};

use super::{page_header, param};
use crate::routes::descriptor::Params;

pub fn list(params: &Params) -> Markup {
    let page = params.get("page").map(String::as_str).unwrap_or("1");

    html! {
        (page_header("Clientes", "Cartera de clientes"))
        p class="pagination" { "Página " (page) }
    }
}

pub fn detail(params: &Params) -> Markup {
    html! {
        (page_header("Cliente", "Ficha del cliente"))
        p { "Identificador: " code { (param(params, "id")) } }
        a href="/customers" { "Volver a clientes" }
    }
}
