//! Application Context
//!
//! Shared state provided via Leptos Context API.

use std::rc::Rc;

use chrono::NaiveDate;
use leptos::prelude::*;

use crate::models::Settings;
use crate::sync::{FragmentsSync, SyncSignals};

/// App-wide handles provided via context
#[derive(Clone, Copy)]
pub struct AppContext {
    /// Sync client; not `Send`, so kept in local storage
    sync: StoredValue<Rc<FragmentsSync>, LocalStorage>,
    /// Settings, sync status, last error and current user
    pub sync_state: SyncSignals,
    /// Current local date, advanced by the app's ticker
    pub today: ReadSignal<NaiveDate>,
}

impl AppContext {
    pub fn new(sync: Rc<FragmentsSync>, sync_state: SyncSignals, today: ReadSignal<NaiveDate>) -> Self {
        Self {
            sync: StoredValue::new_local(sync),
            sync_state,
            today,
        }
    }

    /// Apply `change` to the current settings and save them if anything changed
    pub fn update_settings(&self, change: impl FnOnce(&mut Settings)) {
        let mut settings = self.sync_state.settings.get_untracked();
        change(&mut settings);
        if settings != self.sync_state.settings.get_untracked() {
            self.sync.get_value().edit(self.sync_state, settings);
        }
    }

    pub fn sign_in(&self) {
        self.sync.get_value().sign_in_with_google(self.sync_state);
    }

    pub fn sign_out(&self) {
        self.sync.get_value().sign_out(self.sync_state);
    }
}

pub fn use_app_context() -> AppContext {
    expect_context::<AppContext>()
}
