use prompttree_runtime::{InitOutcome, MutationKind, NoteCreateStrategy};

use crate::presentation::view_models::{
    CommandResultViewModel, Guidance, HealthViewModel, InitViewModel, MutationViewModel,
    StatusBadge,
};

pub fn present_init(outcome: &InitOutcome) -> CommandResultViewModel<InitViewModel> {
    let note_create = match outcome.config.consistency.note_create {
        NoteCreateStrategy::Prepend => "prepend",
        NoteCreateStrategy::Refetch => "refetch",
    };
    let content = InitViewModel {
        config_path: outcome.config_path.display().to_string(),
        api_url: outcome.config.api.base_url.clone(),
        timeout_secs: outcome.config.api.timeout_secs,
        note_create: note_create.to_string(),
        created: outcome.created,
    };

    let badge = if outcome.created {
        StatusBadge::success("Config written")
    } else {
        StatusBadge::info("Config already exists")
    };

    let mut result = CommandResultViewModel::new(content)
        .with_badge(badge)
        .with_suggestion(Guidance::new("Check the API is reachable").with_command("prompttree health"));
    if !outcome.created {
        result = result.with_suggestion(
            Guidance::new("Overwrite it with defaults").with_command("prompttree init --force"),
        );
    }
    result
}

pub fn present_health(
    api_url: &str,
    error: Option<String>,
) -> CommandResultViewModel<HealthViewModel> {
    let healthy = error.is_none();
    let content = HealthViewModel {
        api_url: api_url.to_string(),
        healthy,
        error,
    };

    if healthy {
        CommandResultViewModel::new(content).with_badge(StatusBadge::success("API healthy"))
    } else {
        CommandResultViewModel::new(content)
            .with_badge(StatusBadge::warning("API unreachable"))
            .with_suggestion(
                Guidance::new("Point the client at another server")
                    .with_command("prompttree --api-url <URL> health"),
            )
    }
}

pub fn present_mutation(
    kind: MutationKind,
    target: impl Into<String>,
    prompt_count: Option<usize>,
) -> CommandResultViewModel<MutationViewModel> {
    CommandResultViewModel::new(MutationViewModel {
        mutation: kind.label().to_string(),
        target: target.into(),
        prompt_count,
    })
    .with_badge(StatusBadge::success("Done"))
}
