//! Integration tests for the behavior engine driving a full agent

use std::cell::RefCell;
use std::rc::Rc;

use hearthward::agent::{Agent, EmotionKind, NeedKind};
use hearthward::behavior::actions::{FleeAction, IdleAction};
use hearthward::behavior::{
    Action, ActionCtx, BehaviorEngine, BehaviorState, PriorityLevel,
};
use hearthward::core::config::EngineConfig;
use hearthward::core::types::{ActorId, Vec2};
use hearthward::world::WorldView;

/// Configurable stub that records its lifecycle calls
struct StubAction {
    id: String,
    priority: PriorityLevel,
    state: BehaviorState,
    runnable: bool,
    max_duration: Option<u32>,
    log: Option<Rc<RefCell<Vec<String>>>>,
}

impl StubAction {
    fn boxed(id: &str, priority: PriorityLevel, state: BehaviorState) -> Box<dyn Action> {
        Box::new(Self {
            id: id.to_string(),
            priority,
            state,
            runnable: true,
            max_duration: None,
            log: None,
        })
    }

    fn boxed_logged(
        id: &str,
        priority: PriorityLevel,
        state: BehaviorState,
        log: Rc<RefCell<Vec<String>>>,
    ) -> Box<dyn Action> {
        Box::new(Self {
            id: id.to_string(),
            priority,
            state,
            runnable: true,
            max_duration: None,
            log: Some(log),
        })
    }

    fn boxed_with_timeout(
        id: &str,
        priority: PriorityLevel,
        state: BehaviorState,
        max_duration: u32,
        log: Rc<RefCell<Vec<String>>>,
    ) -> Box<dyn Action> {
        Box::new(Self {
            id: id.to_string(),
            priority,
            state,
            runnable: true,
            max_duration: Some(max_duration),
            log: Some(log),
        })
    }

    fn record(&self, event: String) {
        if let Some(log) = &self.log {
            log.borrow_mut().push(event);
        }
    }
}

impl Action for StubAction {
    fn id(&self) -> &str {
        &self.id
    }
    fn display_name(&self) -> &str {
        &self.id
    }
    fn priority(&self) -> PriorityLevel {
        self.priority
    }
    fn result_state(&self) -> BehaviorState {
        self.state
    }
    fn max_duration_ticks(&self) -> Option<u32> {
        self.max_duration
    }
    fn can_run(&self, _agent: &Agent, _world: &WorldView) -> bool {
        self.runnable
    }
    fn start(&mut self, _agent: &mut Agent, _world: &mut WorldView, _ctx: &ActionCtx) {
        self.record(format!("start:{}", self.id));
    }
    fn step(&mut self, _agent: &mut Agent, _world: &mut WorldView, _ctx: &ActionCtx) -> bool {
        true
    }
    fn stop(&mut self, _agent: &mut Agent, _world: &mut WorldView, interrupted: bool) {
        self.record(format!("stop:{}:{}", self.id, interrupted));
    }
}

fn fixture() -> (Agent, WorldView, EngineConfig) {
    let agent = Agent::new("villager", Vec2::default());
    let mut world = WorldView::new();
    world.insert_actor(agent.id, agent.position, false);
    (agent, world, EngineConfig::default())
}

#[test]
fn idle_only_engine_stays_idle_for_a_thousand_ticks() {
    let (mut agent, mut world, config) = fixture();
    let mut engine = BehaviorEngine::with_actions(config, vec![Box::new(IdleAction::new())]);

    for _ in 0..1000 {
        engine.tick(&mut agent, &mut world);
        assert_eq!(engine.current_state(), BehaviorState::Idle);
    }
    assert!(!engine.is_in_emergency());
}

#[test]
fn frightened_agent_flees_then_settles_back_to_idle() {
    let (mut agent, mut world, config) = fixture();
    let interval = config.decision_interval;
    let mut engine = BehaviorEngine::with_actions(
        config.clone(),
        vec![
            Box::new(FleeAction::new(&config)),
            Box::new(IdleAction::new()),
        ],
    );

    agent.emotions.trigger(EmotionKind::Fear, 0.9);
    for _ in 0..interval {
        engine.tick(&mut agent, &mut world);
    }

    assert_eq!(engine.current_action_id(), Some("flee"));
    assert_eq!(engine.current_state(), BehaviorState::Fleeing);
    assert!(engine.is_in_emergency());

    // calm down and feel safe: the next step completes the flee
    agent.emotions.clear_all();
    agent.needs.set(NeedKind::Safety, 80.0);
    engine.tick(&mut agent, &mut world);

    assert_eq!(engine.current_action_id(), None);
    assert_eq!(engine.current_state(), BehaviorState::Idle);
    // the emergency timer keeps running; only time or reset clears it
    assert!(engine.is_in_emergency());
}

#[test]
fn direct_threat_switches_to_flee_without_waiting_for_cadence() {
    let (mut agent, mut world, config) = fixture();
    let mut engine = BehaviorEngine::with_actions(
        config.clone(),
        vec![
            Box::new(FleeAction::new(&config)),
            Box::new(IdleAction::new()),
        ],
    );

    let attacker = ActorId::new();
    world.insert_actor(attacker, Vec2::new(10.0, 0.0), false);

    // bravery 0.5 means a fear threshold of 50; threat level 8 scores 80
    engine.on_threatened(&mut agent, &mut world, attacker, 8);

    assert_eq!(engine.current_action_id(), Some("flee"));
    assert_eq!(engine.current_state(), BehaviorState::Fleeing);
    assert_eq!(engine.current_action().unwrap().target(), Some(attacker));
    assert!(engine.is_in_emergency());
}

#[test]
fn mild_threat_below_fear_threshold_does_not_switch() {
    let (mut agent, mut world, config) = fixture();
    let mut engine = BehaviorEngine::with_actions(
        config.clone(),
        vec![
            Box::new(FleeAction::new(&config)),
            Box::new(IdleAction::new()),
        ],
    );
    agent.traits.bravery = 0.9;

    let loudmouth = ActorId::new();
    world.insert_actor(loudmouth, Vec2::new(5.0, 0.0), false);
    engine.on_threatened(&mut agent, &mut world, loudmouth, 3);

    assert_eq!(engine.current_action_id(), None);
    // the scare is still remembered
    assert!(agent.memory.has_tag(loudmouth, "threat"));
}

#[test]
fn equal_priority_actions_keep_registration_order() {
    let (_, _, config) = fixture();
    let engine = BehaviorEngine::with_actions(
        config,
        vec![
            StubAction::boxed("first", PriorityLevel::Normal, BehaviorState::Working),
            StubAction::boxed("second", PriorityLevel::Normal, BehaviorState::Patrolling),
        ],
    );

    assert_eq!(engine.action_ids(), vec!["first", "second"]);
}

#[test]
fn switch_stops_outgoing_before_starting_incoming() {
    let (mut agent, mut world, config) = fixture();
    let interval = config.decision_interval;
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut engine = BehaviorEngine::with_actions(
        config,
        vec![
            StubAction::boxed_logged(
                "work",
                PriorityLevel::Normal,
                BehaviorState::Working,
                Rc::clone(&log),
            ),
            Box::new(IdleAction::new()),
        ],
    );

    for _ in 0..interval {
        engine.tick(&mut agent, &mut world);
    }
    assert_eq!(engine.current_action_id(), Some("work"));

    engine.register_action(StubAction::boxed_logged(
        "patrol",
        PriorityLevel::High,
        BehaviorState::Patrolling,
        Rc::clone(&log),
    ));
    for _ in 0..interval {
        engine.tick(&mut agent, &mut world);
    }
    assert_eq!(engine.current_action_id(), Some("patrol"));

    assert_eq!(
        *log.borrow(),
        vec![
            "start:work".to_string(),
            "stop:work:true".to_string(),
            "start:patrol".to_string(),
        ]
    );
}

#[test]
fn non_interruptible_state_blocks_preemption_until_forced() {
    let (mut agent, mut world, config) = fixture();
    let interval = config.decision_interval;
    let mut engine = BehaviorEngine::with_actions(
        config,
        vec![
            StubAction::boxed("barter", PriorityLevel::High, BehaviorState::Trading),
            Box::new(IdleAction::new()),
        ],
    );

    for _ in 0..interval {
        engine.tick(&mut agent, &mut world);
    }
    assert_eq!(engine.current_action_id(), Some("barter"));

    engine.register_action(StubAction::boxed(
        "chase",
        PriorityLevel::Critical,
        BehaviorState::Pursuing,
    ));
    for _ in 0..interval * 3 {
        engine.tick(&mut agent, &mut world);
    }
    // trading cannot be interrupted, even by a higher priority
    assert_eq!(engine.current_action_id(), Some("barter"));

    engine.force_state(&mut agent, &mut world, BehaviorState::Idle, 0);
    for _ in 0..interval {
        engine.tick(&mut agent, &mut world);
    }
    assert_eq!(engine.current_action_id(), Some("chase"));
}

#[test]
fn timed_out_action_is_ended_with_natural_completion() {
    let (mut agent, mut world, config) = fixture();
    let interval = config.decision_interval;
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut engine = BehaviorEngine::with_actions(
        config,
        vec![
            StubAction::boxed_with_timeout(
                "chore",
                PriorityLevel::Normal,
                BehaviorState::Working,
                5,
                Rc::clone(&log),
            ),
            Box::new(IdleAction::new()),
        ],
    );

    // selected on the first decision tick, then runs out its five ticks
    for _ in 0..interval + 5 {
        engine.tick(&mut agent, &mut world);
    }
    assert_eq!(engine.current_state(), BehaviorState::Idle);
    assert!(log
        .borrow()
        .iter()
        .any(|event| event == "stop:chore:false"));
}

#[test]
fn unregistering_the_running_action_interrupts_it() {
    let (mut agent, mut world, config) = fixture();
    let interval = config.decision_interval;
    let log = Rc::new(RefCell::new(Vec::new()));
    let mut engine = BehaviorEngine::with_actions(
        config,
        vec![
            StubAction::boxed_logged(
                "work",
                PriorityLevel::Normal,
                BehaviorState::Working,
                Rc::clone(&log),
            ),
            Box::new(IdleAction::new()),
        ],
    );

    for _ in 0..interval {
        engine.tick(&mut agent, &mut world);
    }
    assert_eq!(engine.current_action_id(), Some("work"));

    engine
        .unregister_action(&mut agent, &mut world, "work")
        .unwrap();
    assert_eq!(engine.current_action_id(), None);
    assert_eq!(engine.current_state(), BehaviorState::Idle);
    assert!(log.borrow().iter().any(|event| event == "stop:work:true"));
    assert!(engine
        .action_ids_for_state(BehaviorState::Working)
        .is_empty());
}

#[test]
fn witnessed_serious_crime_sends_dutiful_agent_to_alert() {
    let (mut agent, mut world, config) = fixture();
    agent.traits.civic_duty = 0.8;
    let mut engine = BehaviorEngine::with_actions(
        config.clone(),
        hearthward::behavior::actions::default_action_set(&config),
    );

    let thug = ActorId::new();
    world.insert_actor(thug, Vec2::new(6.0, 0.0), false);
    engine.on_witness_crime(
        &mut agent,
        &mut world,
        thug,
        hearthward::behavior::CrimeKind::Assault,
        6,
    );

    assert_eq!(engine.current_action_id(), Some("alert_authorities"));
    assert_eq!(engine.current_state(), BehaviorState::Alerting);
    assert_eq!(engine.current_action().unwrap().target(), Some(thug));
    assert!(agent.memory.has_tag(thug, "criminal"));
}

#[test]
fn witnessed_atrocity_makes_timid_agent_flee() {
    let (mut agent, mut world, config) = fixture();
    agent.traits.civic_duty = 0.1;
    let mut engine = BehaviorEngine::with_actions(
        config.clone(),
        hearthward::behavior::actions::default_action_set(&config),
    );

    let killer = ActorId::new();
    world.insert_actor(killer, Vec2::new(4.0, 0.0), false);
    engine.on_witness_crime(
        &mut agent,
        &mut world,
        killer,
        hearthward::behavior::CrimeKind::Murder,
        9,
    );

    assert_eq!(engine.current_action_id(), Some("flee"));
    assert_eq!(engine.current_action().unwrap().target(), Some(killer));
}

#[test]
fn suspicious_activity_sends_curious_agent_investigating() {
    let (mut agent, mut world, config) = fixture();
    agent.traits.curiosity = 0.9;
    let mut engine = BehaviorEngine::with_actions(
        config.clone(),
        hearthward::behavior::actions::default_action_set(&config),
    );

    let lurker = ActorId::new();
    world.insert_actor(lurker, Vec2::new(9.0, 3.0), false);
    engine.on_suspicious_activity(&mut agent, &mut world, Some(lurker), "shadow on the wall");

    assert_eq!(engine.current_action_id(), Some("investigate"));
    assert_eq!(engine.current_state(), BehaviorState::Investigating);
    assert_eq!(engine.current_action().unwrap().target(), Some(lurker));
}

#[test]
fn incurious_agent_shrugs_off_suspicious_activity() {
    let (mut agent, mut world, config) = fixture();
    agent.traits.curiosity = 0.2;
    let mut engine = BehaviorEngine::with_actions(
        config.clone(),
        hearthward::behavior::actions::default_action_set(&config),
    );

    engine.on_suspicious_activity(&mut agent, &mut world, None, "odd noise");
    assert_eq!(engine.current_action_id(), None);
    // suspicion is still felt even when nothing is done about it
    assert!(agent.emotions.has_active_emotion(EmotionKind::Suspicion));
}
