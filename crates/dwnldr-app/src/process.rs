//! Message processing through the TEA update loop

use tokio::sync::mpsc;

use crate::actions::{handle_action, ActionContext};
use crate::handler;
use crate::message::Message;
use crate::poller::Pollers;
use crate::state::AppState;

/// Process a message through the TEA update function
///
/// Follow-up messages are processed in the same call; each action is
/// dispatched before its follow-up message.
pub fn process_message(
    state: &mut AppState,
    message: Message,
    msg_tx: &mpsc::Sender<Message>,
    ctx: &ActionContext,
    pollers: &mut Pollers,
) {
    let mut msg = Some(message);
    while let Some(m) = msg {
        let result = handler::update(state, m);

        if let Some(action) = result.action {
            handle_action(action, msg_tx.clone(), ctx, pollers);
        }

        msg = result.message;
    }
}
