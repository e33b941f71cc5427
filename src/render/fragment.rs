//! Construtores de HTML do fragmento devolvido ao host.

use html_escape::{encode_double_quoted_attribute, encode_text};

use crate::types::config::RunnerOptions;
use crate::types::responses::{CompiledView, InlineAnnotation, RunOutcome};

/// Monta o fragmento renderizável de uma invocação.
///
/// Sem visão compilada (primeira renderização), o fragmento contém apenas
/// a decoração estática: link e restrições de tamanho. Com diagnóstico e
/// nenhum stdout, o fragmento é a exibição de erro no lugar da saída
/// normal. Caso contrário entram as anotações inline e/ou o painel,
/// conforme as opções. Todo texto interpolado é escapado.
pub fn fragment(outcome: &RunOutcome, opts: &RunnerOptions) -> String {
    let link_html = outcome.link.as_deref().map(link_anchor).unwrap_or_default();
    let sizing_html = sizing_marker(outcome);

    let Some(view) = &outcome.compiled else {
        return format!("{sizing_html}{link_html}");
    };

    if view.error_only() {
        return format!("{}{}", error_block(&view.stderr), link_html);
    }

    let mut parts = vec![sizing_html];

    if opts.inline && !view.annotations.is_empty() {
        parts.push(annotations_block(&view.annotations));
    }

    if opts.panel && (!view.stdout.is_empty() || !view.stderr.is_empty()) {
        parts.push(output_panel(view));
    }

    if !view.stderr.is_empty() && !opts.panel {
        parts.push(warning_badge(&view.stderr));
    }

    parts.push(link_html);
    parts.concat()
}

/// Âncora para abrir o snippet no Compiler Explorer.
fn link_anchor(url: &str) -> String {
    format!(
        "<a class=\"palco-link\" href=\"{}\" target=\"_blank\" rel=\"noopener\" \
         title=\"Abrir no Compiler Explorer\">CE</a>",
        encode_double_quoted_attribute(url)
    )
}

/// Marcador com as restrições de tamanho do bloco.
///
/// O host lê os atributos `data-*` e aplica as restrições ao contêiner do
/// editor; o núcleo não injeta estilo diretamente.
fn sizing_marker(outcome: &RunOutcome) -> String {
    if outcome.max_width.is_none() && outcome.max_height.is_none() {
        return String::new();
    }

    let mut attrs = String::new();
    if let Some(width) = &outcome.max_width {
        attrs.push_str(&format!(
            " data-max-width=\"{}\"",
            encode_double_quoted_attribute(width)
        ));
    }
    if let Some(height) = &outcome.max_height {
        attrs.push_str(&format!(
            " data-max-height=\"{}\"",
            encode_double_quoted_attribute(height)
        ));
    }

    format!("<div class=\"palco-sizing\"{attrs} hidden></div>")
}

/// Exibição de erro no lugar da saída normal.
fn error_block(stderr: &str) -> String {
    format!(
        "<pre class=\"palco-error\">{}</pre>",
        encode_text(stderr)
    )
}

/// Anotações por linha, para o host decorar o editor.
fn annotations_block(annotations: &[InlineAnnotation]) -> String {
    let mut items = String::new();
    for annotation in annotations {
        items.push_str(&format!(
            "<span data-line=\"{}\">{}</span>",
            annotation.line,
            encode_text(&annotation.text)
        ));
    }

    format!("<div class=\"palco-inline\" hidden>{items}</div>")
}

/// Painel compacto com stdout e stderr agregados.
fn output_panel(view: &CompiledView) -> String {
    let mut parts = String::new();

    if !view.stdout.is_empty() {
        parts.push_str(&format!(
            "<pre class=\"palco-stdout\">{}</pre>",
            encode_text(&view.stdout)
        ));
    }
    if !view.stderr.is_empty() {
        parts.push_str(&format!(
            "<pre class=\"palco-stderr\">{}</pre>",
            encode_text(&view.stderr)
        ));
    }

    format!("<div class=\"palco-panel\">{parts}</div>")
}

/// Indicador compacto de avisos quando o painel está desligado.
fn warning_badge(stderr: &str) -> String {
    format!(
        "<span class=\"palco-warning\" title=\"{}\">&#9888; avisos</span>",
        encode_double_quoted_attribute(stderr)
    )
}
