use std::path::Path;

use datafolder_core::Catalog;
use tabled::{
    builder::Builder,
    settings::{Style, object::Rows, style::LineText},
};

const ENDPOINTS_LABEL: &str = "Endpoints";
const ENDPOINTS_OFFSET: usize = 2;

fn endpoint_table(catalog: &Catalog) -> String {
    let mut builder = Builder::default();
    builder.push_record(["endpoint", "description"]);
    for name in catalog.names() {
        builder.push_record([format!("/{name}"), format!("query {name}")]);
    }
    builder.push_record(["/_schema", "all schemas"]);
    builder.push_record(["/_help", "api help"]);

    let mut table = builder.build();
    table.with(Style::rounded());
    table.with(LineText::new(ENDPOINTS_LABEL, Rows::first()).offset(ENDPOINTS_OFFSET));
    table.to_string()
}

/// Startup banner: folder, server URL and the endpoint table.
pub fn render(folder: &Path, base_url: &str, catalog: &Catalog) -> String {
    let folder = folder
        .canonicalize()
        .unwrap_or_else(|_| folder.to_path_buf());

    let mut out = format!(
        "datafolder v{}\n\n  folder:  {}\n  server:  {base_url}\n\n",
        env!("CARGO_PKG_VERSION"),
        folder.display()
    );
    if catalog.is_empty() {
        out.push_str("  no data files found\n");
    } else {
        out.push_str(&endpoint_table(catalog));
        out.push('\n');
    }
    out.push_str("\n  press ctrl+c to stop\n");
    out
}
