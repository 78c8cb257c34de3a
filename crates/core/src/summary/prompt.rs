//! Prompt construction from the template configuration.

use super::types::TemplateConfig;

/// Builds the model instruction text for a consultation summary.
///
/// Audio is the primary information source; images are supplementary. The
/// prompt explicitly forbids inventing information not present in the
/// recordings.
pub fn build_prompt(template: &TemplateConfig, submitted_by: &str) -> String {
    let context_note = if submitted_by == "doctor" {
        "This consultation was recorded by the doctor during patient visit."
    } else {
        "This consultation is being reviewed by the receptionist for final summary."
    };

    let sections_text = template.sections.join(", ");

    format!(
        "You are an AI assistant helping Indian doctors create concise patient consultation summaries.\n\
         \n\
         Context: {context_note}\n\
         \n\
         IMPORTANT: Only include information that was actually mentioned by the doctor in the audio. \
         Do not add assumptions, differential diagnoses, or recommendations not explicitly stated.\n\
         \n\
         Requirements:\n\
         - Language: {language}\n\
         - Tone: {tone}\n\
         - Format: {format}\n\
         - Include sections: {sections}\n\
         \n\
         Instructions:\n\
         1. **PRIMARY FOCUS**: Transcribe and analyze the audio recording(s) - this is the main source of information\n\
         2. Extract key medical information mentioned in the audio conversations\n\
         3. **SECONDARY**: If images are provided, analyze them and mention relevant visual findings (handwritten notes, prescriptions, medical images, etc.)\n\
         4. Process ALL audio files provided (primary + additional recordings) for complete context\n\
         5. Keep the summary concise and factual based on what was actually said/shown\n\
         6. Use appropriate medical terminology for Indian healthcare context\n\
         7. Only include medications, dosages, and advice explicitly mentioned by the doctor in audio\n\
         8. Do not add assumptions or recommendations not explicitly stated in the audio\n\
         9. If information is missing from audio, simply omit that section rather than noting it's missing\n\
         10. **IMPORTANT**: If images are provided, include a brief mention of visual findings or observations from the images in your summary\n\
         \n\
         Please provide a concise, factual patient consultation summary based primarily on the audio \
         recording(s), supplemented by any relevant visual information from images. If images are \
         present, include observations about what is visible in them.",
        context_note = context_note,
        language = template.language,
        tone = template.tone,
        format = template.prescription_format,
        sections = sections_text,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_doctor_context() {
        let prompt = build_prompt(&TemplateConfig::default(), "doctor");
        assert!(prompt.contains("recorded by the doctor"));
        assert!(!prompt.contains("receptionist"));
    }

    #[test]
    fn test_receptionist_context() {
        let prompt = build_prompt(&TemplateConfig::default(), "receptionist");
        assert!(prompt.contains("reviewed by the receptionist"));
    }

    #[test]
    fn test_template_values_embedded() {
        let template = TemplateConfig {
            prescription_format: "freeform".to_string(),
            language: "Hindi".to_string(),
            tone: "casual".to_string(),
            sections: vec!["Diagnosis".to_string(), "Follow-up".to_string()],
        };

        let prompt = build_prompt(&template, "doctor");
        assert!(prompt.contains("Language: Hindi"));
        assert!(prompt.contains("Tone: casual"));
        assert!(prompt.contains("Format: freeform"));
        assert!(prompt.contains("Include sections: Diagnosis, Follow-up"));
    }
}
