//! Host Lifecycle
//!
//! This example drives a host through registration and hardware inventory.
//!
//! Key concepts:
//! - Declaring states and transition types as constants
//! - Initial rules that fire for entities with no state yet
//! - Complementary conditions built with `not`
//! - Transition actions that veto the state change
//! - Exporting the rule set as JSON
//!
//! Run with: cargo run --example host_lifecycle

use turnstile::core::{not, BoxError, Condition, State, Stateful};
use turnstile::docs::{StateDoc, TransitionTypeDoc};
use turnstile::{
    states, transition_types, BuildError, StateMachine, StateMachineBuilder, TransitionRuleBuilder,
};

states! {
    DISCOVERING = "Discovering",
    KNOWN = "Known",
    INSUFFICIENT = "Insufficient",
}

transition_types! {
    REGISTER = "Register",
    SET_HW_INFO = "SetHwInfo",
}

// Host entity
#[derive(Debug, Default)]
struct Host {
    id: u32,
    state: State,
    cores: u32,
}

impl Stateful for Host {
    fn state(&self) -> State {
        self.state.clone()
    }

    fn set_state(&mut self, state: State) -> Result<(), BoxError> {
        self.state = state;
        Ok(())
    }
}

// Arguments carried by SetHwInfo
struct Inventory {
    cores: u32,
}

fn has_enough_cores() -> Condition<Host, Inventory> {
    Condition::new(|_: &Host, inventory: &Inventory| inventory.cores >= 4)
}

fn store_inventory(host: &mut Host, inventory: &Inventory) -> Result<(), BoxError> {
    if inventory.cores == 0 {
        return Err("inventory reported no cores".into());
    }
    host.cores = inventory.cores;
    Ok(())
}

fn build_machine() -> Result<StateMachine<Host, Inventory>, BuildError> {
    let reporting = [DISCOVERING, KNOWN, INSUFFICIENT];

    Ok(StateMachineBuilder::new()
        .rule(
            TransitionRuleBuilder::new()
                .on(REGISTER)
                .from_initial()
                .to(DISCOVERING)
                .documented("Register", "Host registers for the first time"),
        )?
        .rule(
            TransitionRuleBuilder::new()
                .on(REGISTER)
                .from(DISCOVERING)
                .to(DISCOVERING)
                .documented("Re-register", "Host registers again while discovering"),
        )?
        .rule(
            TransitionRuleBuilder::new()
                .on(SET_HW_INFO)
                .from_states(reporting.clone())
                .condition(has_enough_cores())
                .transition(store_inventory)
                .to(KNOWN)
                .documented("Sufficient", "Host meets the hardware requirements"),
        )?
        .rule(
            TransitionRuleBuilder::new()
                .on(SET_HW_INFO)
                .from_states(reporting)
                .condition(not(has_enough_cores()))
                .transition(store_inventory)
                .post_transition(|host: &mut Host, _: &Inventory| {
                    println!("  host {} needs attention", host.id);
                    Ok(())
                })
                .to(INSUFFICIENT)
                .documented("Insufficient", "Host lacks the required cores"),
        )?
        .describe_state(
            DISCOVERING,
            StateDoc::new("Discovering", "Awaiting inventory"),
        )
        .describe_state(KNOWN, StateDoc::new("Known", "Host can be installed"))
        .describe_state(INSUFFICIENT, StateDoc::new("Insufficient", "Too few cores"))
        .describe_transition_type(
            REGISTER,
            TransitionTypeDoc::new("Register", "Host agent registers with the service"),
        )
        .describe_transition_type(
            SET_HW_INFO,
            TransitionTypeDoc::new("Set hardware info", "Host agent reports its inventory"),
        )
        .build())
}

fn report(step: &str, host: &Host) {
    let Host { id, state, cores } = host;
    println!("{step}: host {id} is {state:?} with {cores} cores");
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== Host Lifecycle Example ===\n");

    let machine = build_machine()?;
    let mut host = Host {
        id: 7,
        ..Host::default()
    };

    println!("Inventory before registration:");
    if let Err(err) = machine.run(SET_HW_INFO, &mut host, &Inventory { cores: 8 }) {
        println!("  rejected [{}]: {err}", err.error_code());
    }

    machine.run(REGISTER, &mut host, &Inventory { cores: 0 })?;
    report("Registered", &host);

    machine.run(SET_HW_INFO, &mut host, &Inventory { cores: 2 })?;
    report("Reported 2 cores", &host);

    machine.run(SET_HW_INFO, &mut host, &Inventory { cores: 16 })?;
    report("Reported 16 cores", &host);

    println!("\nBroken inventory report:");
    if let Err(err) = machine.run(SET_HW_INFO, &mut host, &Inventory { cores: 0 }) {
        println!("  rejected [{}]: {err}", err.error_code());
    }
    report("After rejection", &host);

    println!("\nExported rules:");
    println!("{}", machine.as_json()?);

    Ok(())
}
