//! Balance simulator: a greedy player clicking and buying for an hour.
//! Run with: cargo test simulate_greedy -- --nocapture

#[cfg(test)]
mod tests {
    use crate::clicker::config::EngineConfig;
    use crate::clicker::engine::Engine;
    use crate::clicker::state::{assert_invariants, Category, GameState};
    use crate::clicker::store::MemoryStore;
    use crate::time::ManualClock;

    const T0: u64 = 1_700_000_000_000;
    const CLICKS_PER_SEC: u64 = 5;

    /// Cheapest payback (in seconds) among affordable items.
    fn find_best_purchase(state: &GameState) -> Option<(String, Category)> {
        let mut best: Option<(f64, String, Category)> = None;

        let click_gain = |power: u64| (power * CLICKS_PER_SEC) as f64;
        let candidates = state
            .click_upgrades
            .iter()
            .map(|u| (u, Category::Click, click_gain(u.per_unit_power)))
            .chain(
                state
                    .auto_upgrades
                    .iter()
                    .map(|a| (&a.upgrade, Category::Auto, a.per_unit_rate as f64)),
            );

        for (upgrade, category, gain) in candidates {
            if state.resource < upgrade.current_cost || gain <= 0.0 {
                continue;
            }
            let payback = upgrade.current_cost as f64 / gain;
            let dominated = best.as_ref().is_some_and(|(bp, _, _)| *bp <= payback);
            if !dominated {
                best = Some((payback, upgrade.id.clone(), category));
            }
        }

        best.map(|(_, id, category)| (id, category))
    }

    fn simulate(
        engine: &mut Engine<MemoryStore, ManualClock>,
        clock: &ManualClock,
        seconds: u64,
    ) -> u32 {
        let growth = engine.config().growth;
        let mut purchases = 0;
        let mut last_earned = engine.state().total_earned;

        for _ in 0..seconds {
            for _ in 0..CLICKS_PER_SEC {
                engine.click();
            }
            while let Some((id, category)) = find_best_purchase(engine.state()) {
                assert!(engine.buy(&id, category), "affordable {id} was refused");
                purchases += 1;
            }
            clock.advance(1_000);
            engine.advance();

            let state = engine.state();
            assert_invariants(state, growth);
            assert!(state.total_earned >= last_earned);
            assert!(state.total_earned >= state.resource);
            last_earned = state.total_earned;
        }
        purchases
    }

    #[test]
    fn simulate_greedy_hour() {
        let clock = ManualClock::new(T0);
        let mut engine = Engine::start(MemoryStore::new(), clock.clone(), EngineConfig::default());

        let purchases = simulate(&mut engine, &clock, 3_600);
        let state = engine.state();

        println!("\n=== Greedy player, 1 hour ===");
        println!("purchases:    {purchases}");
        println!("resource:     {}", state.resource);
        println!("total earned: {}", state.total_earned);
        println!("click power:  {}", state.click_power);
        println!("production:   {}/s", state.production_rate);
        for u in &state.click_upgrades {
            println!("  {:<14} x{}", u.name, u.owned);
        }
        for a in &state.auto_upgrades {
            println!("  {:<14} x{}", a.upgrade.name, a.upgrade.owned);
        }

        assert_eq!(state.total_clicks, 3_600 * CLICKS_PER_SEC);
        assert!(state.production_rate > 0, "never bought a producer");
        assert!(state.total_owned() >= 10);
        assert!(state.has_achievement("clicks-10000"));
        assert!(state.has_achievement("earned-10000"));
        assert!(state.has_achievement("upgrades-10"));
        assert!(!state.has_achievement("clicks-100000"));
    }

    #[test]
    fn simulate_then_reload_from_autosave() {
        let clock = ManualClock::new(T0);
        let mut engine = Engine::start(MemoryStore::new(), clock.clone(), EngineConfig::default());

        // Ends on an autosave boundary, after that second's production tick.
        simulate(&mut engine, &clock, 600);
        let live = engine.state().clone();
        let backend = engine.store().backend().clone();
        engine.shutdown();

        let reloaded = Engine::start(backend, clock.clone(), EngineConfig::default());
        assert_eq!(reloaded.state(), &live);
    }

    #[test]
    fn idle_player_earns_only_from_production() {
        let clock = ManualClock::new(T0);
        let mut engine = Engine::start(MemoryStore::new(), clock.clone(), EngineConfig::default());
        for _ in 0..100 {
            engine.click();
        }
        assert!(engine.buy("grandma", Category::Auto));
        let before = engine.state().total_earned;

        for _ in 0..60 {
            clock.advance(1_000);
            engine.advance();
        }
        let state = engine.state();
        assert_eq!(state.total_earned - before, 60 * state.production_rate);
        assert_eq!(state.total_clicks, 100);
    }
}
