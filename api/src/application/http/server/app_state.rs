use std::sync::Arc;

use nutrifilter_core::application::NutrifilterService;

use crate::args::Args;

#[derive(Clone)]
pub struct AppState {
    pub args: Arc<Args>,
    pub service: NutrifilterService,
}

impl AppState {
    pub fn new(args: Arc<Args>, service: NutrifilterService) -> Self {
        Self { args, service }
    }
}
