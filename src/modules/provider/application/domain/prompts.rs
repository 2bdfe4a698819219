//! Localized prompt scaffolds for `summarize`/`title`, grounded on
//! `original_source/app/ai/openai_provider.py`'s three-language system/user
//! prompt pairs. Section headings are translated per language; the markdown
//! scaffold (Summary / Key Points / Actions / Important Details) is fixed.

use super::entities::Language;

pub fn summarize_system_prompt(language: Language) -> &'static str {
    match language {
        Language::En => {
            "You are an assistant specialized in creating enriched and structured summaries \
             of voice notes and transcriptions. Always respond in English, use markdown, be \
             concise but informative, extract insights and key points, identify actions or \
             tasks mentioned, and highlight names, dates, and important values."
        }
        Language::Es => {
            "Eres un asistente especializado en crear resúmenes enriquecidos y estructurados \
             de notas de voz y transcripciones. Responde SIEMPRE en español, usa markdown, sé \
             conciso pero informativo, extrae insights y puntos clave, identifica acciones o \
             tareas mencionadas y destaca nombres, fechas y valores importantes."
        }
        Language::Pt => {
            "Você é um assistente especializado em criar resumos enriquecidos e estruturados \
             de notas de voz e transcrições. Responda SEMPRE em português brasileiro, use \
             markdown, seja conciso mas informativo, extraia insights e pontos-chave, \
             identifique ações ou tarefas mencionadas e destaque nomes, datas e valores \
             importantes."
        }
    }
}

pub fn summarize_user_prompt(language: Language, combined_text: &str) -> String {
    let (summary_h, points_h, actions_h, details_h, no_actions) = match language {
        Language::En => ("Summary", "Key Points", "Actions/Tasks", "Important Details", "No actions identified"),
        Language::Es => ("Resumen", "Puntos Clave", "Acciones/Tareas", "Detalles Importantes", "Ninguna acción identificada"),
        Language::Pt => ("Resumo", "Pontos-Chave", "Ações/Tarefas", "Detalhes Importantes", "Nenhuma ação identificada"),
    };

    format!(
        "Create an enriched summary of the following content:\n\n---\n{combined_text}\n---\n\n\
         Structure the summary like this:\n\n\
         ## 📌 {summary_h}\n[2-3 sentences summarizing the main content]\n\n\
         ## 💡 {points_h}\n- [point 1]\n- [point 2]\n\n\
         ## ✅ {actions_h}\n[List tasks or actions mentioned, or write \"{no_actions}\"]\n\n\
         ## 📝 {details_h}\n[Names, dates, values, or specific information mentioned]"
    )
}

pub fn title_system_prompt(language: Language) -> &'static str {
    match language {
        Language::En => {
            "You generate short, descriptive titles for voice notes. Maximum 60 characters, \
             English, no quotes or final punctuation, capture the essence of the content, be \
             specific not generic."
        }
        Language::Es => {
            "Generas títulos cortos y descriptivos para notas de voz. Máximo 60 caracteres, \
             español, sin comillas ni puntuación final, captura la esencia del contenido, sé \
             específico, no genérico."
        }
        Language::Pt => {
            "Você gera títulos curtos e descritivos para notas de voz. Máximo 60 caracteres, \
             português brasileiro, sem aspas ou pontuação final, capture a essência do \
             conteúdo, seja específico, não genérico."
        }
    }
}

pub fn title_user_prompt(language: Language, truncated_text: &str) -> String {
    let lead = match language {
        Language::En => "Create a short title for:",
        Language::Es => "Crea un título corto para:",
        Language::Pt => "Crie um título curto para:",
    };
    format!("{lead}\n\n{truncated_text}")
}

pub fn image_description_prompt(language: Language) -> &'static str {
    match language {
        Language::En => {
            "Describe this image in detail in English. Include objects, people, visible text, \
             context, and any relevant information."
        }
        Language::Es => {
            "Describe esta imagen en detalle en español. Incluye objetos, personas, texto \
             visible, contexto y cualquier información relevante."
        }
        Language::Pt => {
            "Descreva esta imagem em detalhes em português brasileiro. Inclua objetos, \
             pessoas, texto visível, contexto e qualquer informação relevante."
        }
    }
}

/// Localized placeholder stored as the summary when the chat provider fails
/// outright (spec §4.6 Stage C: "localized failure string stored").
pub fn summary_failure_marker(language: Language) -> &'static str {
    match language {
        Language::En => "## 📌 Summary\n\n_Automatic summary generation failed for this session._",
        Language::Es => "## 📌 Resumen\n\n_No se pudo generar el resumen automático de esta sesión._",
        Language::Pt => "## 📌 Resumo\n\n_Não foi possível gerar o resumo automático desta sessão._",
    }
}

/// `title` output is capped at 60 characters, truncated with an ellipsis.
pub fn truncate_title(title: String) -> String {
    let title = title.trim().trim_matches(|c| c == '"' || c == '\'').to_string();
    if title.chars().count() > 60 {
        title.chars().take(57).collect::<String>() + "..."
    } else {
        title
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_title_with_ellipsis() {
        let long = "x".repeat(100);
        let truncated = truncate_title(long);
        assert_eq!(truncated.chars().count(), 60);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn strips_surrounding_quotes() {
        assert_eq!(truncate_title("\"hello\"".to_string()), "hello");
    }
}
