//! Full page shell: sidebar, search box, table, and the modal when open.

use crate::options::ChoiceLists;
use crate::resource::ResourceState;
use crate::schema::{ResolvedDashboard, ResolvedPage};
use crate::view::form::render_modal;
use crate::view::table::render_table;
use crate::view::ViewState;
use html_escape::{encode_double_quoted_attribute as attr, encode_text};

const STYLE: &str = "\
body.dashboard{margin:0;display:flex;font-family:sans-serif}\
.sidebar{width:200px;min-height:100vh;background:#1f2937;color:#fff;padding:16px}\
.sidebar a{display:block;color:#cbd5e1;padding:6px 8px;text-decoration:none}\
.sidebar a.active{color:#fff;font-weight:bold}\
main{flex:1;padding:24px}\
.data-table{width:100%;border-collapse:collapse}\
.data-table th,.data-table td{text-align:left;padding:8px;border-bottom:1px solid #e5e7eb}\
.data-table tr .row-action{visibility:hidden;display:inline-block;margin-right:8px}\
.data-table tr:hover .row-action,.data-table tr:focus-within .row-action{visibility:visible}\
.placeholder td{text-align:center;color:#6b7280;padding:24px}\
.banner{background:#fef2f2;color:#991b1b;padding:8px 12px;margin-bottom:12px}\
.form-error{color:#991b1b}\
.pagination{margin-top:12px}\
.modal-backdrop{position:fixed;inset:0;background:rgba(0,0,0,.4);display:flex;align-items:center;justify-content:center}\
.modal{background:#fff;padding:24px;max-width:640px;width:100%}\
.form-grid{display:flex;flex-wrap:wrap;gap:12px}\
.form-field{display:flex;flex-direction:column}\
.col-full{flex-basis:100%}.col-half{flex-basis:48%}.col-third{flex-basis:31%}\
.col-quarter{flex-basis:23%}.col-two-thirds{flex-basis:65%}\
.required{color:#991b1b}\
.help{color:#6b7280;font-size:12px;margin:2px 0 0}";

/// Render one dashboard page around the current resource and view state.
pub fn render_page(
    dashboard: &ResolvedDashboard,
    page: &ResolvedPage,
    resource: &ResourceState,
    view: &ViewState,
    choices: &ChoiceLists,
    form_error: Option<&str>,
) -> String {
    let mut html = String::from("<!doctype html><html><head><meta charset=\"utf-8\" />");
    html.push_str(&format!("<title>{}</title>", encode_text(&page.title)));
    html.push_str(&format!("<style>{}</style>", STYLE));
    html.push_str("</head><body class=\"dashboard\">");

    html.push_str("<aside class=\"sidebar\"><nav>");
    for item in &dashboard.pages {
        let class = if item.path_segment == page.path_segment {
            " class=\"active\""
        } else {
            ""
        };
        html.push_str(&format!(
            "<a{} href=\"/{}\">{}</a>",
            class,
            attr(&item.path_segment),
            encode_text(&item.title)
        ));
    }
    html.push_str("</nav></aside><main>");

    html.push_str(&format!("<header><h1>{}</h1>", encode_text(&page.title)));
    if page.can_create() {
        html.push_str(&format!(
            "<a class=\"button\" href=\"/{}?modal=new\">Add</a>",
            attr(&page.path_segment)
        ));
    }
    html.push_str("</header>");

    // When the modal is reporting a form error the banner would repeat it.
    if form_error.is_none() {
        if let Some(error) = resource.error() {
            html.push_str(&format!("<p class=\"banner\">{}</p>", encode_text(error)));
        }
    }

    html.push_str(&format!(
        "<form class=\"search\" method=\"get\" action=\"/{}\"><input type=\"search\" name=\"q\" value=\"{}\" placeholder=\"Search...\" /></form>",
        attr(&page.path_segment),
        attr(&view.search)
    ));

    html.push_str(&render_table(
        page,
        resource.rows(),
        &view.search,
        resource.loading(),
    ));
    html.push_str(&render_modal(page, &view.modal, choices, form_error));
    html.push_str("</main></body></html>");
    html
}
