//! Testes de integração do cliente HTTP contra um Compiler Explorer falso.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use palco::client::{CompilerClient, GodboltClient};
use palco::types::config::RunnerOptions;
use palco::types::requests::CompileRequest;
use palco::types::responses::CompileOutput;
use palco::{PalcoError, SnippetRunner};

fn request() -> CompileRequest {
    CompileRequest::new(
        "#include <stdio.h>\nint main() { printf(\"oi\\n\"); }\n",
        "cg141",
        "-O0",
    )
}

fn success_body() -> serde_json::Value {
    json!({
        "execResult": {
            "stdout": [{"text": "oi"}, {"text": ""}],
            "stderr": []
        },
        "stderr": []
    })
}

#[tokio::test]
async fn envia_requisicao_no_formato_da_api() {
    let server = MockServer::start().await;

    // O corpo pede execução com os filtros de apresentação habilitados
    Mock::given(method("POST"))
        .and(path("/api/compiler/cg141/compile"))
        .and(header("accept", "application/json"))
        .and(body_partial_json(json!({
            "source": "#include <stdio.h>\nint main() { printf(\"oi\\n\"); }\n",
            "options": {
                "userArguments": "-O0",
                "filters": {
                    "execute": true,
                    "demangle": true,
                    "directives": true,
                    "commentOnly": true
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GodboltClient::new(server.uri()).expect("cliente");
    let response = client.compile(&request()).await.expect("compile ok");

    let output = CompileOutput::from_response(&response);
    assert_eq!(output.stdout, "oi\n");
    // A linha vazia final é descartada das linhas
    assert_eq!(output.stdout_lines, vec!["oi"]);
}

#[tokio::test]
async fn status_de_erro_vira_erro_de_api() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let client = GodboltClient::new(server.uri()).expect("cliente");
    let err = client.compile(&request()).await.expect_err("deve falhar");

    assert!(matches!(err, PalcoError::Api(503)));
}

#[tokio::test]
async fn runner_completo_contra_servidor_falso() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/compiler/cg141/compile"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .expect(1)
        .mount(&server)
        .await;

    let client = GodboltClient::new(server.uri()).expect("cliente");
    let runner = SnippetRunner::new(
        std::sync::Arc::new(client),
        RunnerOptions::default(),
        server.uri(),
    );

    let source = "#include <stdio.h>\nint main() { printf(\"oi\\n\"); }\n";
    let overrides = Default::default();

    // Primeira renderização suprimida, segunda e terceira com uma só requisição
    let first = runner.run(source, &overrides).await.expect("gate");
    assert!(first.compiled.is_none());

    let second = runner.run(source, &overrides).await.expect("compila");
    let view = second.compiled.expect("compilado");
    assert_eq!(view.stdout, "oi\n");
    assert_eq!(view.annotations.len(), 1);
    assert_eq!(view.annotations[0].line, 2);
    assert_eq!(view.annotations[0].text, "oi");

    let _ = runner.run(source, &overrides).await.expect("cache");
    // O .expect(1) do mock verifica no drop que só houve uma requisição
}

#[tokio::test]
async fn falha_de_transporte_permite_nova_tentativa() {
    let server = MockServer::start().await;

    // Primeira requisição falha, a seguinte responde normalmente
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(success_body()))
        .mount(&server)
        .await;

    let client = GodboltClient::new(server.uri()).expect("cliente");
    let runner = SnippetRunner::new(
        std::sync::Arc::new(client),
        RunnerOptions::default(),
        server.uri(),
    );

    let source = "#include <stdio.h>\nint main() { printf(\"oi\\n\"); }\n";
    let overrides = Default::default();

    let _ = runner.run(source, &overrides).await.expect("gate");

    let err = runner.run(source, &overrides).await.expect_err("falha");
    assert!(matches!(err, PalcoError::Shared(_)));

    let retried = runner.run(source, &overrides).await.expect("retry");
    assert!(retried.compiled.is_some());
}
