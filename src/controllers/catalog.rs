//! Product catalogue pages.

use std::sync::Arc;

use crate::controllers::show;
use crate::dispatch::{HandlerResult, Reply};
use crate::routing::{Params, RouteTable};
use crate::view::Page;

pub struct CatalogController {
    routes: Arc<RouteTable>,
}

impl CatalogController {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self { routes }
    }

    pub fn product(&self, params: &Params, reply: &mut Reply) -> HandlerResult {
        let id = params.get("id").ok_or("product route has no 'id' parameter")?;
        let page = Page::new("product")
            .with("title", format!("Page du produit {}", id))
            .with("id", id);
        show(&self.routes, reply, page);
        Ok(())
    }
}
