use crate::initialize::Ctx;

/// Core trait that every Matchmint game implements.
///
/// The lobby and the match creator only need a name, an optional setup
/// validator and a way to build the game-specific part of the initial state.
/// Move handling, turn order and end conditions belong to the rule engine.
pub trait Game {
    /// Custom configuration a match creator may pass in. Opaque to the core.
    type SetupData;

    /// Game-specific state produced by [`Game::setup`].
    type State;

    /// Unique name used to register and look up the game.
    fn name(&self) -> &str;

    /// Check a setup payload before any match state is created.
    ///
    /// Returns an error message when the payload is unacceptable for the
    /// given number of players. Games without constraints keep the default,
    /// which accepts everything.
    fn validate_setup_data(
        &self,
        _setup_data: Option<&Self::SetupData>,
        _num_players: u32,
    ) -> Option<String> {
        None
    }

    /// Build the initial game-specific state.
    fn setup(&self, ctx: &Ctx, setup_data: Option<&Self::SetupData>) -> Self::State;
}
