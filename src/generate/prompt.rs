/// Prompt synthesis
///
/// Turns the user's goal into the positive prompt sent to the provider:
/// a subject sentence built from the goal, fixed style qualifiers, and a
/// technical parameter suffix.

const STYLE_QUALIFIERS: &str = "Photorealistic, professional lighting, confident expression, \
celebrating success, detailed facial features, high resolution, award-winning photography, \
cinematic composition, vibrant colors, sharp focus, professional setting";

const TECHNICAL_SUFFIX: &str = " --style raw --ar 1:1 --q 2";

/// Build the enhanced prompt for a goal
pub fn enhanced_prompt(goal: &str) -> String {
    format!(
        "Professional high-quality photograph of a successful person achieving their goal: \
{goal}. {STYLE_QUALIFIERS}{TECHNICAL_SUFFIX}"
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_embeds_goal_verbatim() {
        let prompt = enhanced_prompt("Opening my own restaurant");
        assert!(prompt.contains("Opening my own restaurant"));
    }

    #[test]
    fn test_prompt_ends_with_technical_suffix() {
        let prompt = enhanced_prompt("Winning an Olympic gold medal");
        assert!(prompt.ends_with("--style raw --ar 1:1 --q 2"));
    }

    #[test]
    fn test_prompt_includes_style_qualifiers() {
        let prompt = enhanced_prompt("any goal at all");
        assert!(prompt.contains("Photorealistic"));
        assert!(prompt.contains("cinematic composition"));
    }
}
