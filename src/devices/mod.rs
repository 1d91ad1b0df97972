//! Device inventory sync controller
//!
//! Owns the credential, the rendered device table, the network statistics,
//! and the add/edit form mode. Every mutation of server state (add, update,
//! delete, credential rotation) is a single authenticated request followed
//! by a full refresh; nothing is patched optimistically. A periodic poller
//! re-reads the collection while authenticated.

use crate::auth::Credential;
use crate::client::{DevicesApi, RequestSequence};
use crate::error::{HomeboardError, Result};
use crate::models::{CredentialUpdate, DeviceRecord, NewDevice};
use crate::storage::SessionStore;
use crate::view::{DeviceTable, StatsView};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// What a form submission does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormMode {
    /// Create a new device
    #[default]
    Add,
    /// Update the device with this id
    Edit(u64),
}

/// The device form: mode plus the two editable fields
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DeviceForm {
    /// Whether submission adds or updates
    pub mode: FormMode,
    /// Device name field
    pub name: String,
    /// MAC address field
    pub mac: String,
}

impl DeviceForm {
    /// Submit-button label for the current mode
    pub fn submit_label(&self) -> &'static str {
        match self.mode {
            FormMode::Add => "Add Device",
            FormMode::Edit(_) => "Update Device",
        }
    }
}

#[derive(Debug, Default)]
struct SyncState {
    credential: Option<Credential>,
    devices: DeviceTable,
    stats: Option<StatsView>,
    form: DeviceForm,
}

/// Controller for the device inventory service
pub struct SyncController<D> {
    api: D,
    store: SessionStore,
    poll_interval: Duration,
    state: RwLock<SyncState>,
    list_requests: RequestSequence,
    stats_requests: RequestSequence,
}

impl<D: DevicesApi> SyncController<D> {
    /// Create a controller with the given poll interval
    pub fn new(api: D, store: SessionStore, poll_interval: Duration) -> Self {
        Self {
            api,
            store,
            poll_interval,
            state: RwLock::new(SyncState::default()),
            list_requests: RequestSequence::new(),
            stats_requests: RequestSequence::new(),
        }
    }

    /// Access the underlying API client
    pub fn api(&self) -> &D {
        &self.api
    }

    /// Whether a credential is held
    pub async fn is_authenticated(&self) -> bool {
        self.state.read().await.credential.is_some()
    }

    /// Username of the current credential, if any
    pub async fn username(&self) -> Option<String> {
        self.state
            .read()
            .await
            .credential
            .as_ref()
            .map(|c| c.username.clone())
    }

    /// Snapshot of the device table
    pub async fn devices(&self) -> DeviceTable {
        self.state.read().await.devices.clone()
    }

    /// Snapshot of the network statistics, if loaded
    pub async fn stats(&self) -> Option<StatsView> {
        self.state.read().await.stats.clone()
    }

    /// Snapshot of the device form
    pub async fn form(&self) -> DeviceForm {
        self.state.read().await.form.clone()
    }

    async fn credential(&self) -> Result<Credential> {
        self.state
            .read()
            .await
            .credential
            .clone()
            .ok_or_else(|| HomeboardError::authentication("not logged in"))
    }

    /// Pick up a persisted credential from a previous session. Returns
    /// whether the controller is now authenticated.
    pub async fn restore_session(&self) -> Result<bool> {
        match self.store.credential()? {
            Some(credential) => {
                debug!("restored session for {}", credential.username);
                self.state.write().await.credential = Some(credential);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Authenticate against the explicit `POST /login` endpoint. Only a
    /// successful response persists the credential; a rejected or failed
    /// login leaves memory and storage untouched.
    pub async fn login(&self, username: &str, password: &str) -> Result<()> {
        self.api.login(username, password).await?;
        self.complete_login(Credential::basic(username, password))
            .await
    }

    /// Legacy login path: infer valid credentials from a 2xx on the device
    /// collection. Compatibility shim for servers without `/login`; it
    /// conflates authorization-check with authentication, which is why the
    /// explicit endpoint is the default.
    pub async fn login_via_probe(&self, username: &str, password: &str) -> Result<()> {
        let credential = Credential::basic(username, password);
        self.api.probe(&credential).await?;
        self.complete_login(credential).await
    }

    async fn complete_login(&self, credential: Credential) -> Result<()> {
        self.store.save_credential(&credential)?;
        info!("logged in as {}", credential.username);
        self.state.write().await.credential = Some(credential);

        // Initial loads; failures here are background noise, the login
        // itself already succeeded.
        if let Err(e) = self.refresh_devices().await {
            warn!("initial device load failed: {e}");
        }
        if let Err(e) = self.refresh_stats().await {
            warn!("initial stats load failed: {e}");
        }
        Ok(())
    }

    /// Drop the credential, clear the device table and form, and remove the
    /// persisted session. Polling is suspended until the next login.
    pub async fn logout(&self) -> Result<()> {
        {
            let mut state = self.state.write().await;
            state.credential = None;
            state.devices = DeviceTable::Empty;
            state.stats = None;
            state.form = DeviceForm::default();
        }
        info!("logged out");
        self.store.clear_credential()
    }

    /// Re-fetch the device collection. A failure keeps the previously
    /// rendered table (only a never-loaded table becomes `Failed`) and
    /// never clears the authenticated state. Responses superseded by a
    /// newer list request are dropped.
    pub async fn refresh_devices(&self) -> Result<()> {
        let credential = self.credential().await?;
        let token = self.list_requests.begin();

        let result = self.api.list_devices(&credential).await;

        if !self.list_requests.is_current(token) {
            debug!("discarding stale device list response");
            return Ok(());
        }

        match result {
            Ok(devices) => {
                self.state.write().await.devices = DeviceTable::from_devices(&devices);
                Ok(())
            }
            Err(e) => {
                warn!("device refresh failed: {e}");
                let mut state = self.state.write().await;
                if !state.devices.has_rows() {
                    state.devices = DeviceTable::Failed;
                }
                Err(e)
            }
        }
    }

    /// Trigger a rescan and replace the table with the refreshed online
    /// flags.
    pub async fn scan_devices(&self) -> Result<()> {
        let credential = self.credential().await?;
        let token = self.list_requests.begin();

        let result = self.api.scan_devices(&credential).await;

        if !self.list_requests.is_current(token) {
            debug!("discarding stale scan response");
            return Ok(());
        }

        let devices = result.map_err(|e| {
            warn!("device scan failed: {e}");
            e
        })?;
        self.state.write().await.devices = DeviceTable::from_devices(&devices);
        Ok(())
    }

    /// Re-fetch network statistics. Failures are logged and leave the
    /// displayed statistics untouched.
    pub async fn refresh_stats(&self) -> Result<()> {
        let credential = self.credential().await?;
        let token = self.stats_requests.begin();

        let result = self.api.network_stats(&credential).await;

        if !self.stats_requests.is_current(token) {
            debug!("discarding stale stats response");
            return Ok(());
        }

        match result {
            Ok(stats) => {
                self.state.write().await.stats = Some(StatsView::from_stats(&stats));
                Ok(())
            }
            Err(e) => {
                warn!("stats refresh failed: {e}");
                Err(e)
            }
        }
    }

    /// Create a device. On success the form resets to add mode and the
    /// table and statistics are re-fetched; on failure nothing changes and
    /// the server's message, when present, is in the returned error.
    pub async fn add_device(&self, name: &str, mac: &str) -> Result<DeviceRecord> {
        let credential = self.credential().await?;
        let device = NewDevice {
            name: name.to_string(),
            mac: mac.to_string(),
        };

        let created = self.api.add_device(&credential, &device).await?;
        info!("added device {} ({})", created.name, created.id);

        self.state.write().await.form = DeviceForm::default();
        self.refresh_after_write().await;
        Ok(created)
    }

    /// Update a device by id. On success the form returns to add mode.
    pub async fn update_device(&self, id: u64, name: &str, mac: &str) -> Result<DeviceRecord> {
        let credential = self.credential().await?;
        let device = NewDevice {
            name: name.to_string(),
            mac: mac.to_string(),
        };

        let updated = self.api.update_device(&credential, id, &device).await?;
        info!("updated device {id}");

        self.state.write().await.form = DeviceForm::default();
        self.refresh_after_write().await;
        Ok(updated)
    }

    /// Delete a device by id and re-fetch the collection.
    pub async fn delete_device(&self, id: u64) -> Result<()> {
        let credential = self.credential().await?;
        self.api.delete_device(&credential, id).await?;
        info!("deleted device {id}");

        self.refresh_after_write().await;
        Ok(())
    }

    /// Post-mutation refresh; the write already succeeded, so failures here
    /// only log.
    async fn refresh_after_write(&self) {
        if let Err(e) = self.refresh_devices().await {
            warn!("post-write device refresh failed: {e}");
        }
        if let Err(e) = self.refresh_stats().await {
            warn!("post-write stats refresh failed: {e}");
        }
    }

    /// Switch the form between add and edit. Entering edit mode pre-fills
    /// the fields from the target row; switching to add clears them.
    pub async fn set_form_mode(&self, mode: FormMode) -> Result<()> {
        let mut state = self.state.write().await;
        match mode {
            FormMode::Add => {
                state.form = DeviceForm::default();
                Ok(())
            }
            FormMode::Edit(id) => {
                let row = match &state.devices {
                    DeviceTable::Rows(rows) => rows.iter().find(|row| row.id == id),
                    _ => None,
                };
                let Some(row) = row else {
                    return Err(HomeboardError::not_found(format!("device {id}")));
                };
                state.form = DeviceForm {
                    mode,
                    name: row.name.clone(),
                    mac: row.mac.clone(),
                };
                Ok(())
            }
        }
    }

    /// Update the editable form fields
    pub async fn set_form_input(&self, name: &str, mac: &str) {
        let mut state = self.state.write().await;
        state.form.name = name.to_string();
        state.form.mac = mac.to_string();
    }

    /// Submit the form according to its mode
    pub async fn submit_form(&self) -> Result<()> {
        let form = self.form().await;
        match form.mode {
            FormMode::Add => {
                self.add_device(&form.name, &form.mac).await?;
            }
            FormMode::Edit(id) => {
                self.update_device(id, &form.name, &form.mac).await?;
            }
        }
        Ok(())
    }

    /// Rotate credentials. A password/confirmation mismatch fails before
    /// any request is issued; on success the new credential is rebuilt
    /// locally and persisted, matching what the server now expects.
    pub async fn change_credentials(
        &self,
        new_username: &str,
        new_password: &str,
        confirm: &str,
    ) -> Result<()> {
        if new_password != confirm {
            return Err(HomeboardError::validation("Passwords do not match"));
        }

        let credential = self.credential().await?;
        let update = CredentialUpdate {
            username: new_username.to_string(),
            password: new_password.to_string(),
        };
        self.api.update_credentials(&credential, &update).await?;

        let rotated = Credential::basic(new_username, new_password);
        self.store.save_credential(&rotated)?;
        info!("credentials rotated for {new_username}");
        self.state.write().await.credential = Some(rotated);
        Ok(())
    }
}

impl<D: DevicesApi + 'static> SyncController<D> {
    /// Spawn the periodic refresh task. Each tick re-reads devices and
    /// statistics; ticks while unauthenticated do nothing. Failures are
    /// logged and retried implicitly on the next tick.
    pub fn spawn_poller(self: &Arc<Self>) -> JoinHandle<()> {
        let controller = Arc::clone(self);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(controller.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if !controller.is_authenticated().await {
                    continue;
                }
                if let Err(e) = controller.refresh_devices().await {
                    warn!("periodic device refresh failed: {e}");
                }
                if let Err(e) = controller.refresh_stats().await {
                    debug!("periodic stats refresh failed: {e}");
                }
            }
        })
    }
}
