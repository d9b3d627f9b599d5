//! General-purpose pages, including the not-found page.

use std::sync::Arc;

use crate::controllers::show;
use crate::dispatch::{HandlerResult, Reply};
use crate::routing::{Params, RouteTable};
use crate::view::Page;

pub struct MainController {
    routes: Arc<RouteTable>,
}

impl MainController {
    pub fn new(routes: Arc<RouteTable>) -> Self {
        Self { routes }
    }

    pub fn home(&self, _params: &Params, reply: &mut Reply) -> HandlerResult {
        show(&self.routes, reply, Page::new("home").with("title", "Vive la home !"));
        Ok(())
    }

    pub fn legal_mentions(&self, _params: &Params, reply: &mut Reply) -> HandlerResult {
        show(
            &self.routes,
            reply,
            Page::new("legal_mentions").with("title", "Mentions légales"),
        );
        Ok(())
    }

    pub fn error404(&self, _params: &Params, reply: &mut Reply) -> HandlerResult {
        show(
            &self.routes,
            reply,
            Page::new("error404").with("title", "Page non trouvée"),
        );
        Ok(())
    }
}
