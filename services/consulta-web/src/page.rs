//! Page rendering for the lookup form.

use anyhow::{Context, Result};
use handlebars::Handlebars;
use serde::Serialize;

use crate::markup::render_markup;

const PAGE_TEMPLATE: &str = include_str!("../templates/page.hbs");
pub const PAGE_TITLE: &str = "Consulta de Prazos de Produção ⏳";
pub const MAINTENANCE_NOTICE: &str = "#### 🚧 Sistema em manutenção\n\nA consulta de prazos está temporariamente indisponível. Tente novamente mais tarde.";

/// Values for one render of the page.
#[derive(Debug, Default, Serialize)]
pub struct PageView {
    pub query: String,
    pub warning: Option<String>,
    pub technical_error: Option<String>,
    /// Result markup, rendered to HTML by the page renderer.
    #[serde(skip)]
    pub result_markup: Option<String>,
}

#[derive(Serialize)]
struct PageContext<'a> {
    title: &'static str,
    maintenance: bool,
    maintenance_html: Option<String>,
    result_html: Option<String>,
    #[serde(flatten)]
    view: &'a PageView,
}

pub struct PageRenderer {
    handlebars: Handlebars<'static>,
}

impl PageRenderer {
    pub fn new() -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars
            .register_template_string("page", PAGE_TEMPLATE)
            .context("Failed to register page template")?;

        Ok(Self { handlebars })
    }

    pub fn lookup_page(&self, view: &PageView) -> Result<String> {
        let context = PageContext {
            title: PAGE_TITLE,
            maintenance: false,
            maintenance_html: None,
            result_html: view.result_markup.as_deref().map(render_markup),
            view,
        };
        self.render(&context)
    }

    pub fn maintenance_page(&self) -> Result<String> {
        let view = PageView::default();
        let context = PageContext {
            title: PAGE_TITLE,
            maintenance: true,
            maintenance_html: Some(render_markup(MAINTENANCE_NOTICE)),
            result_html: None,
            view: &view,
        };
        self.render(&context)
    }

    fn render(&self, context: &PageContext<'_>) -> Result<String> {
        self.handlebars
            .render("page", context)
            .context("Failed to render page")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_form() {
        let pages = PageRenderer::new().unwrap();
        let html = pages.lookup_page(&PageView::default()).unwrap();

        assert!(html.contains("Consulta de Prazos de Produção"));
        assert!(html.contains("Buscar Prazo"));
        assert!(!html.contains("class=\"result\""));
        assert!(!html.contains("class=\"error\""));
    }

    #[test]
    fn test_result_and_query_are_escaped() {
        let pages = PageRenderer::new().unwrap();
        let view = PageView {
            query: "\"><b>".to_string(),
            result_markup: Some("**Produto:** <i>x</i>".to_string()),
            ..Default::default()
        };
        let html = pages.lookup_page(&view).unwrap();

        assert!(html.contains("<strong>Produto:</strong> &lt;i&gt;x&lt;/i&gt;"));
        assert!(!html.contains("\"><b>"));
    }

    #[test]
    fn test_maintenance_page_has_no_form() {
        let pages = PageRenderer::new().unwrap();
        let html = pages.maintenance_page().unwrap();

        assert!(html.contains("Sistema em manutenção"));
        assert!(!html.contains("<form"));
    }
}
