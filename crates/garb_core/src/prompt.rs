//! Instruction prompts for the three generation modes.
//!
//! Each prompt is built exactly once at admission time and stored on the
//! generation record, so reruns of the same record always send the same
//! instruction.

/// Prompt for outfit mode: combine a top and a bottom onto the body image.
pub fn build_outfit_prompt() -> String {
    "Create a new image by combining the elements from the provided images. \
     Take the top clothing item from image 1 and the bottom clothing item from image 2, \
     and place them naturally onto the body in image 3 so it looks like the person is \
     wearing the selected outfit. Fit to body shape and pose, preserve garment proportions \
     and textures, match lighting and shadows, handle occlusion by hair and arms. \
     CRITICAL: The background must be completely white (#FFFFFF) - do not use black, \
     transparent, or any other background color. Replace any existing background with \
     solid white. Do not change the person identity or add accessories."
        .to_string()
}

/// Prompt for nano mode: dress the body image for a free-text occasion.
pub fn build_nano_prompt(occasion: &str) -> String {
    format!(
        "Using the provided image of a model, please add an outfit to the model that would \
         work in this occasion: {occasion}. Ensure the outfit integrates naturally with the \
         model's body shape, pose, and lighting. Keep the background plain white so the focus \
         stays on the model and the outfit."
    )
}

/// Prompt for transfer mode: move the outfit from the inspiration photo onto
/// the body image.
pub fn build_transfer_prompt() -> String {
    "Using the provided images, place the outfit from image 2 onto the person in image 1. \
     Keep the face, body shape, and background of image 1 completely unchanged. Ensure the \
     outfit integrates naturally with the model's body shape, pose, and lighting. \
     CRITICAL: The background must be completely white (#FFFFFF) - do not use black, \
     transparent, or any other background color. Do not change the person identity or \
     add accessories."
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nano_prompt_interpolates_the_occasion() {
        let prompt = build_nano_prompt("a summer wedding");
        assert!(prompt.contains("occasion: a summer wedding."));
    }

    #[test]
    fn fixed_prompts_demand_white_backgrounds() {
        assert!(build_outfit_prompt().contains("#FFFFFF"));
        assert!(build_transfer_prompt().contains("#FFFFFF"));
    }
}
