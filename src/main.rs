//! Squid Sweep entry point
//!
//! Headless driver: runs a scripted session without a renderer or physics
//! engine and logs what the simulation does. The host side (contacts, input)
//! is faked on a fixed schedule.

use std::cell::RefCell;
use std::rc::Rc;

use anyhow::Result;

use squid_sweep::hud::{PollutionLabel, PollutionTint};
use squid_sweep::sim::{Contact, EventSink, GameEvent, Participant, SQUID_DETECTOR, TrashState};
use squid_sweep::{Session, Tuning};

/// Simulated frame length (60 fps host)
const FRAME_DT: f32 = 1.0 / 60.0;
/// How long the demo runs
const DEMO_SECONDS: f32 = 60.0;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Squid Sweep (headless) starting...");

    let tuning = match std::env::args().nth(1) {
        Some(path) => Tuning::load(&path)?,
        None => Tuning::default(),
    };

    let mut session = Session::new(tuning);

    let label = Rc::new(RefCell::new(PollutionLabel::default()));
    let tint = Rc::new(RefCell::new(PollutionTint::default()));
    {
        let label = Rc::clone(&label);
        session.subscribe(move |e: &GameEvent| label.borrow_mut().on_event(e));
        let tint = Rc::clone(&tint);
        session.subscribe(move |e: &GameEvent| tint.borrow_mut().on_event(e));
    }
    session.subscribe(|e: &GameEvent| match e {
        GameEvent::TrashSpawned { trash, pos, .. } => {
            log::info!("{} spawned at x={:.1}", trash, pos.x)
        }
        GameEvent::TrashPickedUp { trash } => log::info!("{} picked up", trash),
        GameEvent::TrashDropped { trash, .. } => log::info!("{} dropped", trash),
        GameEvent::TrashDelivered { trash } => log::info!("{} delivered", trash),
        GameEvent::SceneRequested(scene) => log::info!("Scene requested: {}", scene.scene_name()),
        _ => {}
    });

    let frames = (DEMO_SECONDS / FRAME_DT) as u32;
    for frame in 0..frames {
        script_host(&mut session, frame);
        session.update(FRAME_DT);

        if let Some(scene) = session.take_scene_request() {
            log::info!("Host loads {}", scene.scene_name());
        }
    }

    log::info!(
        "{} | tint {:.2} | {} items in play, {} delivered",
        label.borrow().text,
        tint.borrow().amount,
        session.state.count_where(|s| *s != TrashState::InBoat),
        session.state.count_where(|s| *s == TrashState::InBoat),
    );
    Ok(())
}

/// Stand-in for input devices and the physics engine
fn script_host(session: &mut Session, frame: u32) {
    // Swim in short bursts, turning slowly
    session.input.jump_held = frame % 90 < 10;
    session.input.horizontal = if (frame / 300) % 2 == 0 { 0.3 } else { -0.3 };

    match frame % 600 {
        // Sweep up everything floating
        300 => {
            let free: Vec<_> = session
                .state
                .trash
                .iter()
                .filter(|t| t.can_be_picked_up())
                .map(|t| t.id)
                .collect();
            for id in free {
                session.report_contact(Contact::trigger(
                    Participant::Detector(SQUID_DETECTOR),
                    Participant::Trash(id),
                ));
            }
        }
        // Let go above the boat
        420 => session.input.drop = true,
        // Whatever was dropped lands in the boat before its cooldown ends
        425 => {
            let dropped: Vec<_> = session
                .state
                .trash
                .iter()
                .filter(|t| matches!(t.state, TrashState::Dropped { .. }))
                .map(|t| t.id)
                .collect();
            for id in dropped {
                session.report_contact(Contact::collision(
                    Participant::BoatTop,
                    Participant::Trash(id),
                ));
            }
        }
        _ => {}
    }
}
