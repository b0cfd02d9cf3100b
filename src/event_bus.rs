//! Dispatch of [events](crate::events) to the handlers registered for them.
//!
//! Synchronization is synchronous, so unlike a threaded event bus, handlers here are fired inline on
//! the thread that called `synchronize`, right after the event happens.

use crate::events::*;
use crate::logging::Logger;

pub(crate) type HandlerPtr<T> = Box<dyn Fn(&T) + Send>;

pub(crate) struct EventHandlers {
    pub(crate) start_sync_handlers: Vec<HandlerPtr<StartSyncEvent>>,
    pub(crate) deliver_block_handlers: Vec<HandlerPtr<DeliverBlockEvent>>,
    pub(crate) consume_pending_handlers: Vec<HandlerPtr<ConsumePendingEvent>>,
    pub(crate) end_sync_handlers: Vec<HandlerPtr<EndSyncEvent>>,
    pub(crate) sync_failure_handlers: Vec<HandlerPtr<SyncFailureEvent>>,
}

impl EventHandlers {
    /// Collect the user-provided handlers, adding the default [loggers](crate::logging) in front of
    /// them if `log_events` is set.
    pub(crate) fn new(
        log_events: bool,
        start_sync_handler: Option<HandlerPtr<StartSyncEvent>>,
        deliver_block_handler: Option<HandlerPtr<DeliverBlockEvent>>,
        consume_pending_handler: Option<HandlerPtr<ConsumePendingEvent>>,
        end_sync_handler: Option<HandlerPtr<EndSyncEvent>>,
        sync_failure_handler: Option<HandlerPtr<SyncFailureEvent>>,
    ) -> EventHandlers {
        EventHandlers {
            start_sync_handlers: handlers(log_events, start_sync_handler),
            deliver_block_handlers: handlers(log_events, deliver_block_handler),
            consume_pending_handlers: handlers(log_events, consume_pending_handler),
            end_sync_handlers: handlers(log_events, end_sync_handler),
            sync_failure_handlers: handlers(log_events, sync_failure_handler),
        }
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.start_sync_handlers.is_empty()
            && self.deliver_block_handlers.is_empty()
            && self.consume_pending_handlers.is_empty()
            && self.end_sync_handlers.is_empty()
            && self.sync_failure_handlers.is_empty()
    }

    pub(crate) fn fire_handlers(&self, event: Event) {
        match event {
            Event::StartSync(start_sync_event) => self
                .start_sync_handlers
                .iter()
                .for_each(|handler| handler(&start_sync_event)),

            Event::DeliverBlock(deliver_block_event) => self
                .deliver_block_handlers
                .iter()
                .for_each(|handler| handler(&deliver_block_event)),

            Event::ConsumePending(consume_pending_event) => self
                .consume_pending_handlers
                .iter()
                .for_each(|handler| handler(&consume_pending_event)),

            Event::EndSync(end_sync_event) => self
                .end_sync_handlers
                .iter()
                .for_each(|handler| handler(&end_sync_event)),

            Event::SyncFailure(sync_failure_event) => self
                .sync_failure_handlers
                .iter()
                .for_each(|handler| handler(&sync_failure_event)),
        }
    }
}

fn handlers<T: Logger>(log_events: bool, user_handler: Option<HandlerPtr<T>>) -> Vec<HandlerPtr<T>> {
    let mut handlers = Vec::new();
    if log_events {
        handlers.push(T::get_logger());
    }
    if let Some(handler) = user_handler {
        handlers.push(handler);
    }
    handlers
}
