//! # User Notices
//!
//! One-shot messages shown to the shopper when a cart operation is abandoned.
//! The texts are fixed; the storefront is Brazilian.

use std::fmt::Display;
use tokio::sync::mpsc;
use tracing::error;

/// The notices a cart operation can raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notice {
    /// The requested amount is above the available stock.
    StockExceeded,
    /// Adding a product failed for any other reason.
    AddFailed,
    /// The product to remove is not in the cart.
    RemoveFailed,
    /// Changing an amount failed for any other reason.
    UpdateFailed,
}

impl Notice {
    pub const fn message(self) -> &'static str {
        match self {
            Notice::StockExceeded => "Quantidade solicitada fora de estoque",
            Notice::AddFailed => "Erro na adição do produto",
            Notice::RemoveFailed => "Erro na remoção do produto",
            Notice::UpdateFailed => "Erro na alteração de quantidade do produto",
        }
    }
}

impl Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Where notices go. Implementations must not block.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Logs each notice at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        error!(?notice, "{}", notice);
    }
}

/// Forwards notices to a channel, for a UI loop or a test.
#[derive(Debug, Clone)]
pub struct ChannelNotifier {
    sender: mpsc::UnboundedSender<Notice>,
}

impl ChannelNotifier {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Notice>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }
}

impl Notifier for ChannelNotifier {
    fn notify(&self, notice: Notice) {
        // Nobody listening is fine: the notice is one-shot.
        let _ = self.sender.send(notice);
    }
}
