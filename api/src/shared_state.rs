use std::sync::Arc;

use crate::{notify::SharedNotifier, store::RegistrationStore};

pub struct InnerState {
    pub production: bool,
    pub store: Arc<dyn RegistrationStore>,
    pub notifiers: Vec<SharedNotifier>,
    /// Tournament that new submissions are filed under.
    pub tournament_id: i64,
}

pub type AppState = Arc<InnerState>;
