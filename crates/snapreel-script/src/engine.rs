//! Sentence template engine.
//!
//! Templates carry `{placeholder}` markers that are substituted with the
//! caller's phrases. Hook and CTA are chosen uniformly at random; the body
//! templates are all used, in order.

use rand::seq::IndexedRandom;
use rand::Rng;

use snapreel_models::{GeneratedScript, ScriptRequest};

const HOOKS: [&str; 5] = [
    "Stop scrolling if you want to {benefit}.",
    "You won't believe how fast you can {benefit}.",
    "Do this daily to {benefit} in under 30 seconds.",
    "Here's the {niche} hack that actually works.",
    "The truth nobody tells you about {niche}.",
];

const BODIES: [&str; 3] = [
    "Step 1: {stepOne}.",
    "Next, {stepTwo} to keep momentum.",
    "Now {stepThree} so the algorithm keeps pushing you.",
];

const CTAS: [&str; 4] = [
    "Follow for daily {niche} boosts.",
    "Comment \"READY\" if you want a custom plan.",
    "Share this with someone who needs a {niche} upgrade.",
    "Save this so you never forget the steps.",
];

/// Generate a script using the thread-local RNG.
pub fn generate_script(request: &ScriptRequest) -> GeneratedScript {
    generate_script_with(request, &mut rand::rng())
}

/// Generate a script with an injected RNG.
pub fn generate_script_with<R: Rng + ?Sized>(request: &ScriptRequest, rng: &mut R) -> GeneratedScript {
    let hook = choose(&HOOKS, rng)
        .replacen("{benefit}", &request.benefit, 1)
        .replacen("{niche}", &request.niche, 1);

    let body = BODIES
        .iter()
        .map(|line| {
            line.replacen("{stepOne}", &request.step_one, 1)
                .replacen("{stepTwo}", &request.step_two, 1)
                .replacen("{stepThree}", &request.step_three, 1)
                .replacen("{niche}", &request.niche, 1)
        })
        .collect::<Vec<_>>()
        .join(" ");

    let cta = choose(&CTAS, rng).replacen("{niche}", &request.niche, 1);

    let script = GeneratedScript::join(&hook, &body, &cta);

    GeneratedScript {
        hook,
        body,
        cta,
        script,
        niche: request.niche.clone(),
    }
}

fn choose<'a, R: Rng + ?Sized>(templates: &'a [&'a str], rng: &mut R) -> &'a str {
    templates.choose(rng).copied().expect("template list is non-empty")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn request() -> ScriptRequest {
        ScriptRequest {
            niche: "business growth".to_string(),
            benefit: "grow your audience".to_string(),
            step_one: "hook viewers with a quick payoff".to_string(),
            step_two: "layer authority with proof or data".to_string(),
            step_three: "drop a bold call-to-action".to_string(),
        }
    }

    #[test]
    fn test_no_placeholders_survive() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..50 {
            let script = generate_script_with(&request(), &mut rng);
            for text in [&script.hook, &script.body, &script.cta] {
                assert!(!text.contains('{'), "unsubstituted placeholder in {text:?}");
            }
        }
    }

    #[test]
    fn test_body_uses_all_steps_in_order() {
        let mut rng = StdRng::seed_from_u64(1);
        let script = generate_script_with(&request(), &mut rng);

        let first = script.body.find("hook viewers with a quick payoff").unwrap();
        let second = script.body.find("layer authority with proof or data").unwrap();
        let third = script.body.find("drop a bold call-to-action").unwrap();
        assert!(first < second && second < third);
    }

    #[test]
    fn test_script_joins_all_beats() {
        let mut rng = StdRng::seed_from_u64(3);
        let script = generate_script_with(&request(), &mut rng);
        assert_eq!(
            script.script,
            format!("{} {} {}", script.hook, script.body, script.cta)
        );
        assert_eq!(script.niche, "business growth");
    }

    #[test]
    fn test_hook_is_from_template_library() {
        let mut rng = StdRng::seed_from_u64(11);
        let script = generate_script_with(&request(), &mut rng);
        // Every hook template either names the niche or the benefit
        assert!(
            script.hook.contains("grow your audience") || script.hook.contains("business growth")
        );
    }
}
