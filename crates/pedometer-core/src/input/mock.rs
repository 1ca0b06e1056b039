use super::{InputProvider, MenuAction};

/// Replays a fixed list of actions, one per poll.
#[derive(Debug, Clone, Copy)]
pub struct ScriptedInput<'a> {
    actions: &'a [MenuAction],
    cursor: usize,
}

impl<'a> ScriptedInput<'a> {
    pub const fn new(actions: &'a [MenuAction]) -> Self {
        Self { actions, cursor: 0 }
    }

    pub fn is_finished(&self) -> bool {
        self.cursor >= self.actions.len()
    }
}

impl InputProvider for ScriptedInput<'_> {
    type Error = core::convert::Infallible;

    fn poll_action(&mut self) -> Result<Option<MenuAction>, Self::Error> {
        let Some(action) = self.actions.get(self.cursor).copied() else {
            return Ok(None);
        };
        self.cursor = self.cursor.saturating_add(1);
        Ok(Some(action))
    }
}
