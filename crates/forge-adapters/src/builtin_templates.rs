//! Built-in templates compiled into the binary.
//!
//! One template per `(kind, target)` pair. Every template ships an `ops.yml`
//! declaring a single entry under `commands:` or `services:`, plus the
//! runtime files for its target. Content uses the `{{pkg}}`, `{{name}}`,
//! `{{version}}` and `{{description}}` placeholders.
//!
//! A local template directory can shadow any of these; see
//! [`crate::template_loader`].

use forge_core::domain::{
    FileSpec, RelativePath, Template, TemplateId, TemplateKind, TemplateOrigin, TemplateSource,
    TemplateTarget,
};
use tracing::debug;

/// `(path, content, executable)`
type StaticFile = (&'static str, &'static str, bool);

// ── Shared files ──────────────────────────────────────────────────────────────

const DOCKERIGNORE_NODE: &str = "node_modules\nnpm-debug.log\n.git\n";
const DOCKERIGNORE_GO: &str = ".git\nbin/\n";
const DOCKERIGNORE_PYTHON: &str = ".git\n__pycache__\n*.pyc\n.venv\n";
const DOCKERIGNORE_BASH: &str = ".git\n";

const GITIGNORE_NODE: &str = "node_modules\n.env\n";
const GITIGNORE_GO: &str = "bin/\n.env\n";
const GITIGNORE_PYTHON: &str = "__pycache__/\n*.pyc\n.venv/\n.env\n";

// ── Node ──────────────────────────────────────────────────────────────────────

const PACKAGE_JSON: &str = r#"{
  "name": "{{pkg}}",
  "version": "{{version}}",
  "description": "{{description}}",
  "main": "index.js",
  "private": true,
  "dependencies": {
    "@cto.ai/sdk": "^2.0.0"
  }
}
"#;

const NODE_DOCKERFILE: &str = r#"FROM node:18-alpine
WORKDIR /ops
COPY package.json .
RUN npm install --production
COPY . .
"#;

const NODE_COMMAND_INDEX: &str = r#"const { ux, sdk } = require('@cto.ai/sdk')

async function main () {
  const { repo } = await ux.prompt({
    type: 'input',
    name: 'repo',
    message: 'Which application do you want to deploy?',
    allowEmpty: false
  })

  await sdk.track([], {
    event_name: 'deployment',
    event_action: 'succeeded',
    branch: 'main',
    repo
  })

  await ux.print(`🚀 ${repo}'s successful deployment has been recorded!`)
}

main().catch((err) => {
  console.error(err)
  process.exit(1)
})
"#;

const NODE_SERVICE_INDEX: &str = r#"const http = require('http')
const { ux } = require('@cto.ai/sdk')

async function main () {
  await ux.print('starting the server')
  http
    .createServer((req, res) => {
      res.writeHead(200, { 'Content-Type': 'text/plain; charset=utf-8' })
      res.end('Hello World!')
    })
    .listen(8080, '0.0.0.0')
}

main()
"#;

// ── Go ────────────────────────────────────────────────────────────────────────

const GO_MOD: &str = r#"module {{pkg}}

go 1.21

require github.com/cto-ai/sdk-go v1.2.2
"#;

const GO_SUM: &str = "";

const GO_DOCKERFILE: &str = r#"FROM golang:1.21-alpine AS build
WORKDIR /src
COPY . .
RUN go build -o /out/main .

FROM alpine:3.19
WORKDIR /ops
COPY --from=build /out/main /ops/main
"#;

const GO_COMMAND_MAIN: &str = r#"package main

import (
	"fmt"

	ctoai "github.com/cto-ai/sdk-go"
)

func main() {
	client := ctoai.NewClient()

	repo, err := client.Prompt.Input("repo", "Which application do you want to deploy?", ctoai.OptInputAllowEmpty(false))
	if err != nil {
		panic(err)
	}

	event := map[string]interface{}{
		"event_name":   "deployment",
		"event_action": "succeeded",
		"branch":       "main",
		"repo":         repo,
	}

	if err := client.Sdk.Track([]string{}, "", event); err != nil {
		panic(err)
	}

	if err := client.Ux.Print(fmt.Sprintf("🚀 %s's successful deployment has been recorded!", repo)); err != nil {
		panic(err)
	}
}
"#;

const GO_SERVICE_MAIN: &str = r#"package main

import (
	"fmt"
	"net/http"

	ctoai "github.com/cto-ai/sdk-go"
)

func main() {
	client := ctoai.NewClient()
	if err := client.Ux.Print("starting the server"); err != nil {
		panic(err)
	}

	http.HandleFunc("/", hello)
	if err := http.ListenAndServe(":8080", nil); err != nil {
		panic(err)
	}
}

func hello(w http.ResponseWriter, r *http.Request) {
	fmt.Fprint(w, "Hello World!")
}
"#;

// ── Python ────────────────────────────────────────────────────────────────────

const PYTHON_DOCKERFILE: &str = r#"FROM python:3.11-slim
WORKDIR /ops
COPY requirements.txt .
RUN pip install --no-cache-dir -r requirements.txt
COPY . .
"#;

const PYTHON_COMMAND_REQUIREMENTS: &str = "cto-ai>=2.0.0\n";
const PYTHON_SERVICE_REQUIREMENTS: &str = "cto-ai>=2.0.0\nflask>=3.0\n";

const PYTHON_COMMAND_MAIN: &str = r#"from cto_ai import ux, prompt, sdk


def main():
    repo = prompt.input(name="repo", message="Which application do you want to deploy?", allowEmpty=False)

    event = {
        "event_name": "deployment",
        "event_action": "succeeded",
        "branch": "main",
        "repo": repo,
    }
    sdk.track([], "", event)

    ux.print(f"🚀 {repo}'s successful deployment has been recorded!")


if __name__ == "__main__":
    main()
"#;

const PYTHON_SERVICE_MAIN: &str = r#"from cto_ai import ux
from flask import Flask

app = Flask(__name__)


@app.route("/", defaults={"path": ""})
@app.route("/<path:path>", methods=["GET", "POST", "PUT", "PATCH", "DELETE"])
def hello(path):
    return "Hello World!"


if __name__ == "__main__":
    ux.print("starting the server")
    app.run(host="0.0.0.0", port=8080)
"#;

// ── Bash ──────────────────────────────────────────────────────────────────────

const BASH_DOCKERFILE: &str = r#"FROM alpine:3.19
RUN apk add --no-cache bash netcat-openbsd
WORKDIR /ops
COPY main.sh .
"#;

const BASH_COMMAND_MAIN: &str = r#"#!/usr/bin/env bash
set -euo pipefail

repo=$(sdk prompt input --name repo --message "Which application do you want to deploy?" --allow-empty=false)

sdk track --event-name deployment --event-action succeeded --branch main --repo "$repo"

sdk print "🚀 ${repo}'s successful deployment has been recorded!"
"#;

const BASH_SERVICE_MAIN: &str = r#"#!/usr/bin/env bash
set -euo pipefail

sdk print "starting the server"

while true; do
  printf 'HTTP/1.1 200 OK\r\nContent-Type: text/plain; charset=utf-8\r\nContent-Length: 12\r\n\r\nHello World!' \
    | nc -l -p 8080 -q 1 > /dev/null
done
"#;

// ── Manifests ─────────────────────────────────────────────────────────────────

const fn command_manifest(target: TemplateTarget) -> &'static str {
    match target {
        TemplateTarget::Node => {
            "version: \"1\"\ncommands:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: node /ops/index.js\n    public: false\n"
        }
        TemplateTarget::Golang => {
            "version: \"1\"\ncommands:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: /ops/main\n    public: false\n"
        }
        TemplateTarget::Python => {
            "version: \"1\"\ncommands:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: python3 /ops/main.py\n    public: false\n"
        }
        TemplateTarget::Bash => {
            "version: \"1\"\ncommands:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: /ops/main.sh\n    public: false\n"
        }
    }
}

const fn service_manifest(target: TemplateTarget) -> &'static str {
    match target {
        TemplateTarget::Node => {
            "version: \"1\"\nservices:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: node /ops/index.js\n    port: [ '8080:8080' ]\n"
        }
        TemplateTarget::Golang => {
            "version: \"1\"\nservices:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: /ops/main\n    port: [ '8080:8080' ]\n"
        }
        TemplateTarget::Python => {
            "version: \"1\"\nservices:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: python3 /ops/main.py\n    port: [ '8080:8080' ]\n"
        }
        TemplateTarget::Bash => {
            "version: \"1\"\nservices:\n  - name: \"{{name}}\"\n    description: \"{{description}}\"\n    run: /ops/main.sh\n    port: [ '8080:8080' ]\n"
        }
    }
}

// ── Assembly ──────────────────────────────────────────────────────────────────

fn files_for(kind: TemplateKind, target: TemplateTarget) -> Vec<StaticFile> {
    let command = kind == TemplateKind::Command;
    let manifest = if command {
        command_manifest(target)
    } else {
        service_manifest(target)
    };

    match target {
        TemplateTarget::Node => vec![
            (".dockerignore", DOCKERIGNORE_NODE, false),
            (".gitignore", GITIGNORE_NODE, false),
            ("Dockerfile", NODE_DOCKERFILE, false),
            (
                "index.js",
                if command { NODE_COMMAND_INDEX } else { NODE_SERVICE_INDEX },
                false,
            ),
            ("ops.yml", manifest, false),
            ("package.json", PACKAGE_JSON, false),
        ],
        TemplateTarget::Golang => vec![
            (".dockerignore", DOCKERIGNORE_GO, false),
            (".gitignore", GITIGNORE_GO, false),
            ("Dockerfile", GO_DOCKERFILE, false),
            ("go.mod", GO_MOD, false),
            ("go.sum", GO_SUM, false),
            (
                "main.go",
                if command { GO_COMMAND_MAIN } else { GO_SERVICE_MAIN },
                false,
            ),
            ("ops.yml", manifest, false),
        ],
        TemplateTarget::Python => vec![
            (".dockerignore", DOCKERIGNORE_PYTHON, false),
            (".gitignore", GITIGNORE_PYTHON, false),
            ("Dockerfile", PYTHON_DOCKERFILE, false),
            (
                "main.py",
                if command { PYTHON_COMMAND_MAIN } else { PYTHON_SERVICE_MAIN },
                false,
            ),
            ("ops.yml", manifest, false),
            (
                "requirements.txt",
                if command {
                    PYTHON_COMMAND_REQUIREMENTS
                } else {
                    PYTHON_SERVICE_REQUIREMENTS
                },
                false,
            ),
        ],
        TemplateTarget::Bash => vec![
            (".dockerignore", DOCKERIGNORE_BASH, false),
            ("Dockerfile", BASH_DOCKERFILE, false),
            (
                "main.sh",
                if command { BASH_COMMAND_MAIN } else { BASH_SERVICE_MAIN },
                true,
            ),
            ("ops.yml", manifest, false),
        ],
    }
}

fn description(kind: TemplateKind, target: TemplateTarget) -> String {
    match kind {
        TemplateKind::Command => format!("{target} command: prompt, track one event, print"),
        TemplateKind::Service => format!("{target} service: answers Hello World! on :8080"),
    }
}

/// The built-in template for one pair.
pub fn builtin(kind: TemplateKind, target: TemplateTarget) -> Template {
    let id = TemplateId::new(kind, target);
    files_for(kind, target).into_iter().fold(
        Template::new(id, description(kind, target), TemplateOrigin::Builtin),
        |template, (path, content, executable)| {
            // Paths above are literals known to be relative.
            let Ok(path) = RelativePath::try_new(path) else {
                return template;
            };
            let spec = FileSpec::new(path, TemplateSource::Static(content));
            template.with_file(if executable { spec.executable() } else { spec })
        },
    )
}

/// Every built-in template, ordered by kind then target.
pub fn all_templates() -> Vec<Template> {
    let templates: Vec<Template> = TemplateKind::ALL
        .into_iter()
        .flat_map(|kind| TemplateTarget::ALL.into_iter().map(move |t| builtin(kind, t)))
        .collect();
    debug!(count = templates.len(), "Built-in templates assembled");
    templates
}
