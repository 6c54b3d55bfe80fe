//! Desk-side demo of the full record/replay cycle.
//!
//! Runs entirely on a host machine with scripted "driver" input:
//! records a take, saves it to slot 1, reloads it, and plays it back
//! through a motor sink that just logs what it would drive. On a real
//! robot the three mock collaborators are replaced by controller and
//! motor wrappers, and `record`/`play` are invoked from the
//! competition driver/autonomous callbacks.
//!
//! Run with `cargo run --example compbot`.

use std::{error::Error, time::Duration};

use log::{info, LevelFilter};

use ekho::{
    fs::logger,
    peripherals::SleepPacer,
    replay::{
        player::{self, PlayOutcome},
        recorder,
        sample::Sample,
        session::ReplaySession,
        slot::Slot,
    },
    store::SlotStore,
};

fn main() -> Result<(), Box<dyn Error>> {
    logger::init(LevelFilter::Info)?;

    let store = SlotStore::open("autons")?;
    let mut session = ReplaySession::new();
    // Tick fast so the demo finishes in about a second instead of 15.
    let mut pacer = SleepPacer::new(Duration::from_millis(1));

    // Scripted driver: ease forward, arc right, work the shooter, ease off.
    let mut tick = 0usize;
    let mut sticks = move || {
        tick += 1;
        match (tick / 100) % 4 {
            0 => Sample::new(80, 0, 0, 0, 0),
            1 => Sample::new(60, 0, 30, 0, 0),
            2 => Sample::new(60, 0, -30, 40, 0),
            _ => Sample::new(0, 0, 0, 0, 0),
        }
    };

    let mut driven = 0usize;
    let mut motors = |s: Sample| {
        if !s.is_neutral() {
            driven += 1;
        }
    };
    let mut cancel = || false;

    recorder::record(&mut session, &mut sticks, &mut motors, &mut cancel, &mut pacer);
    session.save(&store, Slot::Regular(1))?;

    session.load(&store, Slot::Regular(1))?;
    let outcome = player::play(
        &mut session,
        &store,
        &mut motors,
        &mut cancel,
        &false, // not under tournament control
        &mut pacer,
    )?;
    assert_eq!(outcome, PlayOutcome::Completed);

    info!("Demo done: {} non-neutral samples driven in total.", driven);
    log::logger().flush();
    Ok(())
}
