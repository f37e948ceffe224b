//=========================================================================
// Proxy Chain
//=========================================================================
//
// Ordered list of candidate handler sets. A handler call goes to each
// proxy in turn; the first one that answers `Handled` wins. If none does,
// the chain reports `Unhandled` and the caller hands the event to the
// fallback handler.
//
//   [manager hooks, active scene] ──call(id)──► first Handled / Unhandled
//
// An error from any proxy stops the chain immediately.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::handlers::{invoke, EventHandlers, HandlerId, HandlerResult, Response};
use crate::core::event::Event;
use crate::core::scene::{SceneContext, SceneKey};

//=== ProxyChain ==========================================================

/// Borrowed, ordered handler candidates for one call.
pub struct ProxyChain<'p, S: SceneKey> {
    proxies: Vec<&'p mut dyn EventHandlers<S>>,
}

impl<'p, S: SceneKey> ProxyChain<'p, S> {
    pub fn new() -> Self {
        Self {
            proxies: Vec::with_capacity(2),
        }
    }

    /// Appends a proxy; earlier proxies take precedence.
    pub fn push(&mut self, proxy: &'p mut dyn EventHandlers<S>) {
        self.proxies.push(proxy);
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    /// Calls handler `id` on each proxy until one handles it.
    pub fn call(
        &mut self,
        id: HandlerId,
        event: &Event,
        ctx: &mut SceneContext<'_, S>,
    ) -> HandlerResult {
        for proxy in self.proxies.iter_mut() {
            if invoke(&mut **proxy, id, event, ctx)? == Response::Handled {
                return Ok(Response::Handled);
            }
        }
        Ok(Response::Unhandled)
    }
}

impl<'p, S: SceneKey> Default for ProxyChain<'p, S> {
    fn default() -> Self {
        Self::new()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::event::codes;
    use crate::core::scene::ContextFixture;

    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    enum TestScene {
        Main,
    }

    impl SceneKey for TestScene {}

    /// Handles key-down only, counting every call it sees.
    #[derive(Default)]
    struct KeyProxy {
        calls: usize,
        fail: bool,
    }

    impl EventHandlers<TestScene> for KeyProxy {
        fn on_key_down_event(
            &mut self,
            _event: &Event,
            _ctx: &mut SceneContext<'_, TestScene>,
        ) -> HandlerResult {
            self.calls += 1;
            if self.fail {
                return Err("key proxy failed".into());
            }
            Ok(Response::Handled)
        }
    }

    #[derive(Default)]
    struct Silent;
    impl EventHandlers<TestScene> for Silent {}

    fn key_down() -> Event {
        Event::new(codes::KEY_DOWN)
    }

    #[test]
    fn first_handling_proxy_wins() {
        let mut fixture = ContextFixture::<TestScene>::new();
        let mut first = KeyProxy::default();
        let mut second = KeyProxy::default();

        let response = {
            let mut chain = ProxyChain::<TestScene>::new();
            chain.push(&mut first);
            chain.push(&mut second);
            let mut ctx = fixture.context();
            let response = chain.call(HandlerId::KeyDown, &key_down(), &mut ctx).unwrap();
            response
        };

        assert_eq!(response, Response::Handled);
        assert_eq!(first.calls, 1);
        assert_eq!(second.calls, 0, "Later proxies must not be reached");
    }

    #[test]
    fn unhandled_proxies_are_skipped() {
        let mut fixture = ContextFixture::<TestScene>::new();
        let mut silent = Silent;
        let mut keys = KeyProxy::default();

        let response = {
            let mut chain = ProxyChain::<TestScene>::new();
            chain.push(&mut silent);
            chain.push(&mut keys);
            let mut ctx = fixture.context();
            let response = chain.call(HandlerId::KeyDown, &key_down(), &mut ctx).unwrap();
            response
        };

        assert_eq!(response, Response::Handled);
        assert_eq!(keys.calls, 1);
    }

    #[test]
    fn nobody_handling_reports_unhandled() {
        let mut fixture = ContextFixture::<TestScene>::new();
        let mut keys = KeyProxy::default();

        let mut chain = ProxyChain::<TestScene>::new();
        chain.push(&mut keys);
        let response = chain
            .call(HandlerId::KeyUp, &Event::new(codes::KEY_UP), &mut fixture.context())
            .unwrap();

        assert_eq!(response, Response::Unhandled);
    }

    #[test]
    fn empty_chain_is_unhandled() {
        let mut fixture = ContextFixture::<TestScene>::new();
        let mut chain = ProxyChain::<TestScene>::new();
        assert!(chain.is_empty());

        let response = chain.call(HandlerId::Quit, &Event::new(codes::QUIT), &mut fixture.context());
        assert_eq!(response.unwrap(), Response::Unhandled);
    }

    #[test]
    fn error_stops_chain() {
        let mut fixture = ContextFixture::<TestScene>::new();
        let mut failing = KeyProxy { calls: 0, fail: true };
        let mut after = KeyProxy::default();

        let result = {
            let mut chain = ProxyChain::<TestScene>::new();
            chain.push(&mut failing);
            chain.push(&mut after);
            let mut ctx = fixture.context();
            let result = chain.call(HandlerId::KeyDown, &key_down(), &mut ctx);
            result.map_err(|e| e.to_string())
        };

        assert!(result.is_err());
        assert_eq!(after.calls, 0);
    }
}
