//! `GET /`: an HTML page linking every GET route that takes no path parameter.

use crate::model::ResourceModel;
use crate::state::AppState;
use axum::{extract::State, response::Html};

/// Routes outside the resource model that are always mounted.
const FIXED_LINKS: [&str; 3] = ["/health", "/ready", "/version"];

pub fn links(model: &ResourceModel) -> Vec<String> {
    let mut out = vec!["/".to_string()];
    for entity in &model.entities {
        out.push(format!("/{}", entity.path_segment));
    }
    if let Ok(users) = model.require(crate::model::EntityKind::User) {
        out.push(format!("/{}/favorites", users.path_segment));
    }
    out.extend(FIXED_LINKS.iter().map(|s| s.to_string()));
    out.sort();
    out
}

pub fn render(links: &[String]) -> String {
    let items: String = links
        .iter()
        .map(|l| format!("<li><a href=\"{l}\">{l}</a></li>"))
        .collect();
    format!(
        "<!DOCTYPE html><html><head><title>{name}</title></head><body><h1>{name} {version}</h1><h2>Endpoints</h2><ul>{items}</ul></body></html>",
        name = env!("CARGO_PKG_NAME"),
        version = env!("CARGO_PKG_VERSION"),
    )
}

pub async fn sitemap(State(state): State<AppState>) -> Html<String> {
    Html(render(&links(&state.model)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_parameterless_get_routes() {
        let links = links(&ResourceModel::builtin(true));
        for expected in ["/", "/characters", "/planets", "/users", "/users/favorites", "/vehicles", "/health"] {
            assert!(links.iter().any(|l| l == expected), "missing {expected}");
        }
        assert!(links.iter().all(|l| !l.contains(':')));
    }

    #[test]
    fn renders_anchor_per_link() {
        let html = render(&["/users".to_string()]);
        assert!(html.contains("<a href=\"/users\">/users</a>"));
    }
}
