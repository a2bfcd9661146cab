//! Re-showing the active panel once it docks again.
//!
//! The panel is deselected right away and reselected after a short delay,
//! which makes the host rebuild it in its docked layout.

use super::{Inner, RestoreError};
use crate::core::PanelId;
use std::rc::Rc;
use tracing::{debug, warn};

impl Inner {
    pub(super) fn restore_active_panel(self: &Rc<Self>) {
        if self.session.restore_timer.get().is_some() {
            debug!("restore already pending");
            return;
        }
        let Some(id) = self.signals.selected.get() else {
            return;
        };
        if self.host.is_none() {
            self.report_restore_failure(RestoreError::HostUnavailable(id));
            return;
        }

        self.signals.selected.set(None);
        let delay = self.settings.restore_delay();
        let handle = self
            .scheduler
            .schedule(delay, self.deferred(move |inner| inner.finish_restore(id)));
        self.session.restore_timer.set(Some(handle));
        debug!(delay_ms = delay.as_millis() as u64, "restore scheduled");
    }

    fn finish_restore(&self, id: PanelId) {
        self.session.restore_timer.set(None);
        self.signals.selected.set(Some(id.clone()));

        if let Err(error) = self.show_restored(&id) {
            self.report_restore_failure(error);
        } else {
            debug!(panel = %id, "panel restored");
        }
    }

    fn show_restored(&self, id: &PanelId) -> Result<(), RestoreError> {
        let host = self
            .host
            .as_ref()
            .ok_or_else(|| RestoreError::HostUnavailable(id.clone()))?;
        let panel = host
            .panel_data(id)
            .ok_or_else(|| RestoreError::PanelNotFound(id.clone()))?;
        host.show_panel(&panel)?;
        Ok(())
    }

    fn report_restore_failure(&self, error: RestoreError) {
        warn!(%error, "could not restore panel");
        *self.last_restore_error.borrow_mut() = Some(error);
    }
}
