//! Agent that replays a fixed script.
//!
//! Replies are consumed front to back. A reply is only consumed by the
//! kind of question it answers; when the next reply does not fit, or the
//! script is empty, the agent falls back to a fixed default: lock all
//! dice, take the first option, and say no to every confirmation.

use std::collections::VecDeque;

use super::agent::{Agent, Decision, DecisionContext, DiceRequest};
use crate::dice::{Die, DieFace};
use crate::engine::TurnCommand;

/// One scripted answer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Reply {
    /// Answer `choose_command` with this command, wherever it sits in the menu.
    Command(TurnCommand),
    /// Answer `choose_dice` with these pool indices.
    Dice(Vec<usize>),
    /// Decline a `choose_dice`, `choose_items` or `choose_rearrangement`.
    Decline,
    Item(usize),
    Items(Vec<usize>),
    Rearrangement(usize),
    /// Answer `choose_face` with this face, wherever it sits in the options.
    Face(DieFace),
    Confirm(bool),
}

/// Replays queued [`Reply`] values.
#[derive(Clone, Debug, Default)]
pub struct ScriptedAgent {
    replies: VecDeque<Reply>,
}

impl ScriptedAgent {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
        }
    }

    /// Append a reply to the end of the script.
    pub fn push(&mut self, reply: Reply) {
        self.replies.push_back(reply);
    }

    /// Replies not consumed yet.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }

    fn next_if(&mut self, accepts: impl Fn(&Reply) -> bool) -> Option<Reply> {
        if self.replies.front().is_some_and(accepts) {
            self.replies.pop_front()
        } else {
            None
        }
    }
}

impl Agent for ScriptedAgent {
    fn choose_command(&mut self, _ctx: &DecisionContext<'_>, commands: &[TurnCommand]) -> usize {
        match self.next_if(|r| matches!(r, Reply::Command(_))) {
            // An unknown command maps past the end and is rejected.
            Some(Reply::Command(wanted)) => commands
                .iter()
                .position(|&c| c == wanted)
                .unwrap_or(commands.len()),
            _ => commands.len().saturating_sub(1),
        }
    }

    fn choose_dice(
        &mut self,
        _ctx: &DecisionContext<'_>,
        request: &DiceRequest,
        pool: &[Die],
    ) -> Decision<Vec<usize>> {
        match self.next_if(|r| matches!(r, Reply::Dice(_) | Reply::Decline)) {
            Some(Reply::Dice(picks)) => Decision::Chosen(picks),
            Some(_) => Decision::Declined,
            None => Decision::Chosen((0..request.max.min(pool.len())).collect()),
        }
    }

    fn choose_item(&mut self, _ctx: &DecisionContext<'_>, _prompt: &str, _options: &[String]) -> usize {
        match self.next_if(|r| matches!(r, Reply::Item(_))) {
            Some(Reply::Item(index)) => index,
            _ => 0,
        }
    }

    fn choose_items(
        &mut self,
        _ctx: &DecisionContext<'_>,
        _prompt: &str,
        _options: &[String],
        min: usize,
        _max: usize,
    ) -> Decision<Vec<usize>> {
        match self.next_if(|r| matches!(r, Reply::Items(_) | Reply::Decline)) {
            Some(Reply::Items(picks)) => Decision::Chosen(picks),
            Some(_) => Decision::Declined,
            None => Decision::Chosen((0..min).collect()),
        }
    }

    fn choose_rearrangement(
        &mut self,
        _ctx: &DecisionContext<'_>,
        _dice: &[Die],
        _options: &[Vec<DieFace>],
    ) -> Decision<usize> {
        match self.next_if(|r| matches!(r, Reply::Rearrangement(_) | Reply::Decline)) {
            Some(Reply::Rearrangement(index)) => Decision::Chosen(index),
            Some(_) => Decision::Declined,
            None => Decision::Chosen(0),
        }
    }

    fn choose_face(&mut self, _ctx: &DecisionContext<'_>, _die: &Die, options: &[DieFace]) -> usize {
        match self.next_if(|r| matches!(r, Reply::Face(_))) {
            Some(Reply::Face(wanted)) => options
                .iter()
                .position(|&f| f == wanted)
                .unwrap_or(options.len()),
            _ => 0,
        }
    }

    fn confirm(&mut self, _ctx: &DecisionContext<'_>, _prompt: &str) -> bool {
        match self.next_if(|r| matches!(r, Reply::Confirm(_))) {
            Some(Reply::Confirm(answer)) => answer,
            _ => false,
        }
    }
}
