//! The built-in minimal event used when generation fails.
//!
//! Kept deliberately small: one cautious option with a real roll and one
//! guaranteed exit. Gameplay degrades to this instead of surfacing a
//! half-built generated event.

use tm_core::{
    EventOption, EventRewards, FailureBranch, Locale, StatKey, SuccessBranch,
};

struct Script {
    narrative: &'static str,
    observe_text: &'static str,
    observe_success: &'static str,
    observe_failure: &'static str,
    leave_text: &'static str,
    leave_success: &'static str,
}

const KO: Script = Script {
    narrative: "당신은 어두운 동굴 입구에 서 있다. 안쪽에서 차가운 바람이 불어온다.",
    observe_text: "주변을 관찰한다",
    observe_success: "어둠 속에서 희미한 기운의 흐름을 읽어낸다.",
    observe_failure: "아무것도 알아내지 못했다.",
    leave_text: "떠난다",
    leave_success: "조용히 발걸음을 돌린다.",
};

const EN: Script = Script {
    narrative: "You stand at the mouth of a dark cave. Cold air drifts out from within.",
    observe_text: "Observe your surroundings",
    observe_success: "In the darkness you trace a faint current of qi.",
    observe_failure: "You learn nothing.",
    leave_text: "Leave",
    leave_success: "You quietly turn away.",
};

const ZH: Script = Script {
    narrative: "你站在幽暗的洞口前，洞中吹出阵阵寒气。",
    observe_text: "观察四周",
    observe_success: "你在黑暗中察觉到一缕微弱的气息。",
    observe_failure: "你一无所获。",
    leave_text: "离开",
    leave_success: "你悄然转身离去。",
};

/// Narrative and options of the fallback event for `locale`.
pub fn default_event(locale: Locale) -> (String, Vec<EventOption>) {
    let script = match locale {
        Locale::Ko => &KO,
        Locale::En => &EN,
        Locale::Zh => &ZH,
    };

    let observe = EventOption {
        id: "observe".to_string(),
        text: script.observe_text.to_string(),
        success: SuccessBranch {
            probability: 0.9,
            narrative: script.observe_success.to_string(),
            rewards: EventRewards {
                ep: Some(
                    [(StatKey::Clarity, 15), (StatKey::Perception, 5)].into_iter().collect(),
                ),
                ..Default::default()
            },
        },
        failure: Some(FailureBranch {
            narrative: script.observe_failure.to_string(),
            penalties: Default::default(),
        }),
    };
    let leave = EventOption {
        id: "leave".to_string(),
        text: script.leave_text.to_string(),
        success: SuccessBranch {
            probability: 1.0,
            narrative: script.leave_success.to_string(),
            rewards: Default::default(),
        },
        failure: None,
    };

    (script.narrative.to_string(), vec![observe, leave])
}
