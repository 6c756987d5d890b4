//! JSON-RPC API handlers for pepper-host-daemon.
//!
//! Each plugin call is turned into a `HostMessage` and handed to the message
//! filter on the UI thread; the reply travels back on the same request.

use jsonrpsee::core::RpcResult;
use jsonrpsee::proc_macros::rpc;
use jsonrpsee::types::ErrorObjectOwned;
use pepper_plugin_registry::{HostMessage, HostReply, MessageFilter, MimeTypeAvailability, PluginInfo};
use std::sync::Arc;
use tracing::debug;

use crate::content_client::HostInfo;
use crate::ui_thread::{UiBound, UiThreadHandle};

/// Internal failure while dispatching a message.
pub const INTERNAL_ERROR_CODE: i32 = -32000;
/// No filter handled the message.
pub const UNHANDLED_MESSAGE_CODE: i32 = -32001;

/// The plugin host JSON-RPC interface.
#[rpc(server)]
pub trait PepperHostApi {
    /// Is an internal plugin available for `mime_type`?
    #[method(name = "plugins.isAvailableForMimeType")]
    async fn is_available_for_mime_type(&self, mime_type: String)
        -> RpcResult<MimeTypeAvailability>;

    /// List the registered plugins in registration order.
    #[method(name = "plugins.list")]
    async fn list_plugins(&self) -> RpcResult<Vec<PluginInfo>>;

    /// Product token and scheme configuration of the host.
    #[method(name = "host.info")]
    async fn host_info(&self) -> RpcResult<HostInfo>;
}

/// Implementation of the plugin host API.
pub struct ApiImpl {
    filter: UiBound<Arc<dyn MessageFilter>>,
    host_info: HostInfo,
}

impl ApiImpl {
    /// Serve requests with `filter`, which is destroyed on the UI thread.
    pub fn new(filter: Arc<dyn MessageFilter>, ui: UiThreadHandle, host_info: HostInfo) -> Self {
        Self {
            filter: UiBound::new(filter, ui),
            host_info,
        }
    }

    /// Run `message` through the filter on the UI thread.
    async fn dispatch(&self, message: HostMessage) -> RpcResult<HostReply> {
        debug!(?message, "Dispatching host message");

        let filter = Arc::clone(self.filter.get());
        let reply = self
            .filter
            .ui()
            .invoke(move || filter.on_message_received(&message).ok_or(message))
            .await
            .map_err(|e| internal_error(e.to_string()))?;

        reply.map_err(|message| {
            ErrorObjectOwned::owned(
                UNHANDLED_MESSAGE_CODE,
                format!("Message not handled: {:?}", message),
                None::<()>,
            )
        })
    }
}

fn internal_error(message: String) -> ErrorObjectOwned {
    ErrorObjectOwned::owned(INTERNAL_ERROR_CODE, message, None::<()>)
}

fn unexpected_reply(reply: HostReply) -> ErrorObjectOwned {
    internal_error(format!("Unexpected reply: {:?}", reply))
}

#[jsonrpsee::core::async_trait]
impl PepperHostApiServer for ApiImpl {
    async fn is_available_for_mime_type(
        &self,
        mime_type: String,
    ) -> RpcResult<MimeTypeAvailability> {
        match self
            .dispatch(HostMessage::IsInternalPluginAvailableForMimeType { mime_type })
            .await?
        {
            HostReply::Availability(availability) => Ok(availability),
            other => Err(unexpected_reply(other)),
        }
    }

    async fn list_plugins(&self) -> RpcResult<Vec<PluginInfo>> {
        match self.dispatch(HostMessage::GetInternalPlugins).await? {
            HostReply::Plugins(plugins) => Ok(plugins),
            other => Err(unexpected_reply(other)),
        }
    }

    async fn host_info(&self) -> RpcResult<HostInfo> {
        Ok(self.host_info.clone())
    }
}
