use maud::{Markup, html};

use super::page_header;
use crate::routes::descriptor::{Page, Params};

pub fn home(_params: &Params) -> Markup {
    html! {
        (page_header("Inicio", "Resumen de tu espacio de trabajo"))
        ul class="quick-links" {
            li { a href="/dashboard" { "Dashboard" } }
            li { a href="/customers" { "Clientes" } }
            li { a href="/leads" { "Leads" } }
            li { a href="/tasks" { "Tareas" } }
        }
    }
}

pub fn dashboard(_params: &Params) -> Markup {
    let cards = [
        ("Clientes activos", "customers"),
        ("Leads abiertos", "leads"),
        ("Tareas pendientes", "tasks"),
    ];

    html! {
        (page_header("Dashboard", "Indicadores principales"))
        div class="stat-grid" {
            @for (label, module) in cards {
                div class="stat-card" data-module=(module) {
                    span class="stat-label" { (label) }
                    span class="stat-value" { "0" }
                }
            }
        }
    }
}

pub fn tasks(params: &Params) -> Markup {
    let status = params.get("status").map(String::as_str).unwrap_or("todo");

    html! {
        (page_header("Tareas", "Seguimiento de actividades"))
        nav class="filters" {
            @for option in ["todo", "in-progress", "completed"] {
                a href={ "/tasks?status=" (option) } class=[(option == status).then_some("active")] {
                    (option)
                }
            }
        }
    }
}

pub fn reports(_params: &Params) -> Markup {
    page_header("Reportes", "Rendimiento comercial")
}

pub fn profile(_params: &Params) -> Markup {
    page_header("Perfil", "Datos de tu cuenta")
}

/// SettingsPage
///
/// Shows which REST backend this shell talks to.
pub struct SettingsPage {
    pub api_base_url: String,
}

impl Page for SettingsPage {
    fn render(&self, _params: &Params) -> Markup {
        html! {
            (page_header("Configuración", "Preferencias de la aplicación"))
            dl {
                dt { "API" }
                dd { code { (self.api_base_url) } }
            }
        }
    }
}
