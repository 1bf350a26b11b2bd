//! End-to-end resolution of whole documents: the external pass growing the
//! registry, the local pass inlining it, and the ordering guarantees of
//! concurrent fan-out.

use async_trait::async_trait;
use openapi_deref::{
    BoxError, ComponentLoader, ExternalDereferenceError, ExternallyDereferenceable,
    LoadedComponents, ResolveDocument,
};
use openapi_types::{
    ComponentName, Components, Document, Info, MediaType, Operation, PathItem, Reference,
    ReferenceOr, RequestBody, Response, Schema, SecurityRequirement, SecurityScheme,
};
use std::collections::HashMap;
use std::time::Duration;

fn name(raw: &str) -> ComponentName {
    ComponentName::new(raw).unwrap()
}

/// Serves canned component registries, sleeping first so that completion
/// order differs from request order.
struct DelayedLoader {
    files: HashMap<String, Components>,
    delays: HashMap<String, Duration>,
}

impl DelayedLoader {
    fn new() -> Self {
        Self {
            files: HashMap::new(),
            delays: HashMap::new(),
        }
    }

    fn with_file(mut self, locator: &str, components: Components) -> Self {
        self.files.insert(locator.to_string(), components);
        self
    }

    fn with_delay(mut self, locator: &str, delay: Duration) -> Self {
        self.delays.insert(locator.to_string(), delay);
        self
    }
}

#[async_trait]
impl ComponentLoader for DelayedLoader {
    async fn load(&self, locator: &str) -> Result<LoadedComponents, BoxError> {
        if let Some(delay) = self.delays.get(locator) {
            tokio::time::sleep(*delay).await;
        }
        self.files
            .get(locator)
            .cloned()
            .map(LoadedComponents::new)
            .ok_or_else(|| anyhow::anyhow!("no such document: {locator}").into())
    }
}

/// A petstore document whose request body lives in a shared external file,
/// which in turn references a schema of its own.
fn petstore() -> Document {
    Document::new(Info::new("Petstore", "1.0.0"))
        .with_path(
            "/pets",
            PathItem::new()
                .with_get(
                    Operation::new()
                        .with_id("listPets")
                        .with_response("200", Reference::<Response>::component(name("Pets"))),
                )
                .with_post(
                    Operation::new()
                        .with_id("createPet")
                        .with_request_body(
                            Reference::<RequestBody>::parse(
                                "shared.yaml#/components/requestBodies/NewPet",
                            )
                            .unwrap(),
                        )
                        .with_response("201", Response::new("created")),
                ),
        )
        .with_components(
            Components::new()
                .with_schema(name("Pet"), Schema::object().with_title("Pet"))
                .with_response(
                    name("Pets"),
                    Response::new("A list of pets").with_content(
                        "application/json",
                        MediaType::with_schema(Schema::array(Reference::<Schema>::component(
                            name("Pet"),
                        ))),
                    ),
                ),
        )
}

fn shared_file() -> Components {
    Components::new()
        .with_request_body(
            name("NewPet"),
            RequestBody::new()
                .with_content(
                    "application/json",
                    MediaType::with_schema(Reference::<Schema>::component(name("SharedPet"))),
                )
                .required(),
        )
        .with_schema(name("SharedPet"), Schema::object().with_title("SharedPet"))
}

#[tokio::test]
async fn test_document_resolves_end_to_end() {
    let loader = DelayedLoader::new().with_file("shared.yaml", shared_file());
    let document = petstore();

    let (resolved, warnings) = document.resolve(&loader).await.unwrap();
    assert!(warnings.is_empty());

    let pets = &resolved.paths["/pets"];
    let get = pets.get.as_ref().unwrap();
    assert_eq!(get.responses["200"].component_name(), Some(&name("Pets")));

    // The externally referenced request body came back fully inlined, down
    // to the schema it referenced inside its own file.
    let post = pets.post.as_ref().unwrap();
    let body = post.request_body.as_ref().unwrap();
    assert!(body.is_required());
    let media_type = &body.content["application/json"];
    let schema = media_type.schema.as_ref().unwrap();
    assert_eq!(schema.title(), Some("SharedPet"));
    assert_eq!(schema.component_name(), Some(&name("SharedPet")));
}

#[tokio::test]
async fn test_external_pass_leaves_internal_references_for_the_local_pass() {
    let loader = DelayedLoader::new().with_file("shared.yaml", shared_file());
    let document = petstore();

    let (after_external, _warnings) = document.resolve_external(&loader).await.unwrap();

    // Internal references are untouched by the external pass.
    let get = after_external.paths["/pets"].get.as_ref().unwrap();
    assert!(get.responses["200"].reference_value().is_some());

    // The loaded registry was folded into the document's own components.
    assert!(after_external
        .components
        .schemas
        .contains_key(&name("SharedPet")));
    assert!(after_external
        .components
        .request_bodies
        .contains_key(&name("NewPet")));

    // With the registry grown, the local pass finishes the job.
    let resolved = after_external.resolve_local().unwrap();
    assert_eq!(
        resolved.paths["/pets"].get.as_ref().unwrap().responses["200"].description(),
        "A list of pets"
    );
}

#[tokio::test]
async fn test_document_security_requirements_resolve() {
    let mut document = Document::new(Info::new("Petstore", "1.0.0")).with_components(
        Components::new()
            .with_security_scheme(name("api_key"), SecurityScheme::api_key_header("X-Api-Key")),
    );
    document.security = vec![SecurityRequirement::new().with_scheme(name("api_key"), ["read:pets"])];

    let resolved = document.resolve_local().unwrap();
    assert_eq!(
        resolved.security[0].schemes[&name("api_key")],
        SecurityScheme::api_key_header("X-Api-Key")
    );
}

#[tokio::test]
async fn test_wide_fan_out_preserves_input_order() {
    const WIDTH: usize = 50;

    // Later references complete sooner: doc-0 waits the longest.
    let mut loader = DelayedLoader::new();
    for i in 0..WIDTH {
        let schema_name = format!("S{i}");
        loader = loader
            .with_file(
                &format!("doc-{i}.yaml"),
                Components::new().with_schema(
                    name(&schema_name),
                    Schema::object().with_title(format!("schema-{i}")),
                ),
            )
            .with_delay(
                &format!("doc-{i}.yaml"),
                Duration::from_millis((WIDTH - i) as u64),
            );
    }

    let positions: Vec<ReferenceOr<Schema>> = (0..WIDTH)
        .map(|i| {
            Reference::parse(&format!("doc-{i}.yaml#/components/schemas/S{i}"))
                .unwrap()
                .into()
        })
        .collect();

    let resolution = positions.externally_dereferenced(&loader).await.unwrap();

    // Results line up with the input despite reversed completion order.
    for (i, value) in resolution.value.iter().enumerate() {
        let schema = value.inline_value().expect("substituted inline");
        assert_eq!(schema.title, Some(format!("schema-{i}")));
    }
    // Every file's delta made it into the merged registry.
    assert_eq!(resolution.components.entry_count(), WIDTH);
}

#[tokio::test]
async fn test_failed_subtree_fails_the_whole_document() {
    let document = petstore(); // references shared.yaml, which this loader lacks
    let loader = DelayedLoader::new();

    let err = document.resolve(&loader).await.unwrap_err();
    let message = err.to_string();
    assert!(message.contains("shared.yaml"), "{message}");
}

#[tokio::test]
async fn test_conflicting_external_documents_fail_resolution() {
    // Both files define schemas/Common, differently.
    let loader = DelayedLoader::new()
        .with_file(
            "a.yaml",
            Components::new()
                .with_schema(name("A"), Schema::object())
                .with_schema(name("Common"), Schema::string()),
        )
        .with_file(
            "b.yaml",
            Components::new()
                .with_schema(name("B"), Schema::object())
                .with_schema(name("Common"), Schema::integer()),
        );

    let document = Document::new(Info::new("Conflicted", "1.0.0")).with_path(
        "/things",
        PathItem::new().with_get(
            Operation::new()
                .with_response(
                    "200",
                    Response::new("a").with_content(
                        "application/json",
                        MediaType::with_schema(
                            Reference::<Schema>::parse("a.yaml#/components/schemas/A").unwrap(),
                        ),
                    ),
                )
                .with_response(
                    "404",
                    Response::new("b").with_content(
                        "application/json",
                        MediaType::with_schema(
                            Reference::<Schema>::parse("b.yaml#/components/schemas/B").unwrap(),
                        ),
                    ),
                ),
        ),
    );

    let err = document.resolve_external(&loader).await.unwrap_err();
    assert!(matches!(err, ExternalDereferenceError::Merge(_)));
}
