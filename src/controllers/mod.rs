//! Handler groups of the demo site.
//!
//! Each controller is built per request from the shared route table and
//! hands a [`Page`] to the reply. Every page carries `baseUrl` so views can
//! build links relative to where the application is mounted.

pub mod catalog;
pub mod main;

use crate::dispatch::{HandlerRegistry, Reply};
use crate::routing::{Params, RouteTable};
use crate::view::Page;

pub use catalog::CatalogController;
pub use main::MainController;

/// Registry holding every handler group of the site.
pub fn registry() -> HandlerRegistry {
    let mut registry = HandlerRegistry::new();
    registry
        .group("MainController", MainController::new)
        .action("home", MainController::home)
        .action("legalMentions", MainController::legal_mentions)
        .action("error404", MainController::error404);
    registry
        .group("CatalogController", CatalogController::new)
        .action("product", CatalogController::product);
    registry
}

/// Add the variables every view expects and render.
fn show(routes: &RouteTable, reply: &mut Reply, page: Page) {
    let mut page = page.with("baseUrl", routes.base_path());
    if let Ok(home) = routes.generate("home", &Params::new()) {
        page = page.with("homeUrl", home);
    }
    reply.render(page);
}
