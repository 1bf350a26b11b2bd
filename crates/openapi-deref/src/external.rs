//! The external dereferencing pass: an asynchronous walk that loads every
//! externally referenced document, folds the loaded registries together, and
//! substitutes the pointed-at entries in place.
//!
//! Internal references are deliberately left untouched; this pass grows the
//! registry so that a following local pass can inline them. Sibling subtrees
//! are resolved concurrently, and results are reassembled in input order no
//! matter what order the loads complete in.

use crate::document::DereferencedDocument;
use crate::error::{DereferenceError, ExternalDereferenceError, ResolutionError};
use crate::loader::ComponentLoader;
use crate::local::LocallyDereferenceable;
use async_trait::async_trait;
use futures::future::try_join_all;
use openapi_types::{
    Callback, ComponentValue, Components, Document, Either, Example, Header, InternalReference,
    Link, MediaType, Operation, Parameter, PathItem, Reference, RequestBody, Response, Schema,
    SecurityRequirement, SecurityScheme,
};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// The outcome of externally dereferencing one subtree: the updated value,
/// the delta registry of everything its loads contributed, and the loaders'
/// advisory messages, in input order.
#[derive(Debug, Clone)]
pub struct ExternalResolution<T> {
    /// The subtree with external references substituted.
    pub value: T,
    /// Components contributed by loads inside this subtree.
    pub components: Components,
    /// Advisory messages from loads inside this subtree.
    pub warnings: Vec<String>,
}

impl<T> ExternalResolution<T> {
    /// A resolution contributing no components and no warnings.
    pub fn plain(value: T) -> Self {
        Self {
            value,
            components: Components::new(),
            warnings: Vec::new(),
        }
    }
}

/// Fold one child resolution into the running accumulator, yielding its
/// value. Children are folded sequentially by the coordinating parent, so no
/// lock guards the registry.
fn absorb<T>(
    resolution: ExternalResolution<T>,
    components: &mut Components,
    warnings: &mut Vec<String>,
) -> Result<T, ExternalDereferenceError> {
    components.merge(&resolution.components)?;
    warnings.extend(resolution.warnings);
    Ok(resolution.value)
}

/// A node whose external references can be resolved by loading the documents
/// they point at.
///
/// The injected loader is the only suspension point; structural recursion
/// itself never blocks. A failure anywhere fails the whole call, dropping
/// any sibling work still in flight.
#[async_trait]
pub trait ExternallyDereferenceable: Sized + Send + Sync {
    /// Resolve the external references in this subtree.
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized;
}

#[async_trait]
impl<T> ExternallyDereferenceable for Option<T>
where
    T: ExternallyDereferenceable,
{
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        match self {
            Some(value) => {
                let resolution = value.externally_dereferenced(loader).await?;
                Ok(ExternalResolution {
                    value: Some(resolution.value),
                    components: resolution.components,
                    warnings: resolution.warnings,
                })
            }
            None => Ok(ExternalResolution::plain(None)),
        }
    }
}

#[async_trait]
impl<T> ExternallyDereferenceable for Box<T>
where
    T: ExternallyDereferenceable,
{
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let resolution = (**self).externally_dereferenced(loader).await?;
        Ok(ExternalResolution {
            value: Box::new(resolution.value),
            components: resolution.components,
            warnings: resolution.warnings,
        })
    }
}

#[async_trait]
impl<T> ExternallyDereferenceable for Vec<T>
where
    T: ExternallyDereferenceable,
{
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        // try_join_all polls every element concurrently and hands results
        // back in input order regardless of completion order.
        let resolutions =
            try_join_all(self.iter().map(|item| item.externally_dereferenced(loader))).await?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut values = Vec::with_capacity(resolutions.len());
        for resolution in resolutions {
            values.push(absorb(resolution, &mut components, &mut warnings)?);
        }
        Ok(ExternalResolution {
            value: values,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl<K, V> ExternallyDereferenceable for BTreeMap<K, V>
where
    K: Ord + Clone + Send + Sync,
    V: ExternallyDereferenceable,
{
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let resolutions = try_join_all(self.iter().map(|(key, value)| async move {
            let resolution = value.externally_dereferenced(loader).await?;
            Ok::<_, ExternalDereferenceError>((key.clone(), resolution))
        }))
        .await?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut values = BTreeMap::new();
        for (key, resolution) in resolutions {
            values.insert(key, absorb(resolution, &mut components, &mut warnings)?);
        }
        Ok(ExternalResolution {
            value: values,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl<T> ExternallyDereferenceable for Either<Reference<T>, T>
where
    T: ExternallyDereferenceable + ComponentValue + Clone,
{
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        match self {
            // Internal references are the local pass's job.
            Either::A(Reference::Internal(_)) => Ok(ExternalResolution::plain(self.clone())),
            Either::A(Reference::External(external)) => {
                debug!(locator = external.locator(), "loading external document");
                let loaded = loader.load(external.locator()).await.map_err(|source| {
                    ExternalDereferenceError::Loader {
                        locator: external.locator().to_string(),
                        source,
                    }
                })?;
                for warning in &loaded.warnings {
                    warn!(locator = external.locator(), warning = %warning, "loader warning");
                }
                debug!(
                    locator = external.locator(),
                    entries = loaded.components.entry_count(),
                    "loaded external components"
                );

                let Some(pointer) = external.pointer() else {
                    return Err(ExternalDereferenceError::MissingInternalPointer {
                        locator: external.locator().to_string(),
                    });
                };
                // The loaded entry substitutes for the reference: either a
                // concrete value, or an internal reference into the freshly
                // merged registry that the local pass will inline.
                let entry = loaded
                    .components
                    .lookup_internal(&InternalReference::<T>::new(pointer.clone()))?
                    .clone();
                Ok(ExternalResolution {
                    value: entry,
                    components: loaded.components,
                    warnings: loaded.warnings,
                })
            }
            Either::B(value) => {
                let resolution = value.externally_dereferenced(loader).await?;
                Ok(ExternalResolution {
                    value: Either::B(resolution.value),
                    components: resolution.components,
                    warnings: resolution.warnings,
                })
            }
        }
    }
}

macro_rules! impl_external_identity {
    ($type:ty) => {
        #[async_trait]
        impl ExternallyDereferenceable for $type {
            async fn externally_dereferenced<L>(
                &self,
                _loader: &L,
            ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
            where
                L: ComponentLoader + ?Sized,
            {
                Ok(ExternalResolution::plain(self.clone()))
            }
        }
    };
}

// Nodes with no reference-bearing fields pass through unchanged.
impl_external_identity!(Example);
impl_external_identity!(Link);
impl_external_identity!(SecurityScheme);
impl_external_identity!(SecurityRequirement);

#[async_trait]
impl ExternallyDereferenceable for Schema {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (properties, additional_properties, items, all_of, any_of, one_of, not) = futures::try_join!(
            self.properties.externally_dereferenced(loader),
            self.additional_properties.externally_dereferenced(loader),
            self.items.externally_dereferenced(loader),
            self.all_of.externally_dereferenced(loader),
            self.any_of.externally_dereferenced(loader),
            self.one_of.externally_dereferenced(loader),
            self.not.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut schema = self.clone();
        schema.properties = absorb(properties, &mut components, &mut warnings)?;
        schema.additional_properties =
            absorb(additional_properties, &mut components, &mut warnings)?;
        schema.items = absorb(items, &mut components, &mut warnings)?;
        schema.all_of = absorb(all_of, &mut components, &mut warnings)?;
        schema.any_of = absorb(any_of, &mut components, &mut warnings)?;
        schema.one_of = absorb(one_of, &mut components, &mut warnings)?;
        schema.not = absorb(not, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: schema,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for MediaType {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (schema, examples) = futures::try_join!(
            self.schema.externally_dereferenced(loader),
            self.examples.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut media_type = self.clone();
        media_type.schema = absorb(schema, &mut components, &mut warnings)?;
        media_type.examples = absorb(examples, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: media_type,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for Header {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (schema, examples) = futures::try_join!(
            self.schema.externally_dereferenced(loader),
            self.examples.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut header = self.clone();
        header.schema = absorb(schema, &mut components, &mut warnings)?;
        header.examples = absorb(examples, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: header,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for Parameter {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (schema, examples) = futures::try_join!(
            self.schema.externally_dereferenced(loader),
            self.examples.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut parameter = self.clone();
        parameter.schema = absorb(schema, &mut components, &mut warnings)?;
        parameter.examples = absorb(examples, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: parameter,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for RequestBody {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let content = self.content.externally_dereferenced(loader).await?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut body = self.clone();
        body.content = absorb(content, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: body,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for Response {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (headers, content, links) = futures::try_join!(
            self.headers.externally_dereferenced(loader),
            self.content.externally_dereferenced(loader),
            self.links.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut response = self.clone();
        response.headers = absorb(headers, &mut components, &mut warnings)?;
        response.content = absorb(content, &mut components, &mut warnings)?;
        response.links = absorb(links, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: response,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for Operation {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (parameters, request_body, responses) = futures::try_join!(
            self.parameters.externally_dereferenced(loader),
            self.request_body.externally_dereferenced(loader),
            self.responses.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut operation = self.clone();
        operation.parameters = absorb(parameters, &mut components, &mut warnings)?;
        operation.request_body = absorb(request_body, &mut components, &mut warnings)?;
        operation.responses = absorb(responses, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: operation,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for PathItem {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (get, put, post, delete, options, head, patch, trace, parameters) = futures::try_join!(
            self.get.externally_dereferenced(loader),
            self.put.externally_dereferenced(loader),
            self.post.externally_dereferenced(loader),
            self.delete.externally_dereferenced(loader),
            self.options.externally_dereferenced(loader),
            self.head.externally_dereferenced(loader),
            self.patch.externally_dereferenced(loader),
            self.trace.externally_dereferenced(loader),
            self.parameters.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut path_item = self.clone();
        path_item.get = absorb(get, &mut components, &mut warnings)?;
        path_item.put = absorb(put, &mut components, &mut warnings)?;
        path_item.post = absorb(post, &mut components, &mut warnings)?;
        path_item.delete = absorb(delete, &mut components, &mut warnings)?;
        path_item.options = absorb(options, &mut components, &mut warnings)?;
        path_item.head = absorb(head, &mut components, &mut warnings)?;
        path_item.patch = absorb(patch, &mut components, &mut warnings)?;
        path_item.trace = absorb(trace, &mut components, &mut warnings)?;
        path_item.parameters = absorb(parameters, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: path_item,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for Callback {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let resolution = self.expressions().externally_dereferenced(loader).await?;
        Ok(ExternalResolution {
            value: Callback::from(resolution.value),
            components: resolution.components,
            warnings: resolution.warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for Components {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (
            schemas,
            responses,
            parameters,
            examples,
            request_bodies,
            headers,
            security_schemes,
            links,
            callbacks,
        ) = futures::try_join!(
            self.schemas.externally_dereferenced(loader),
            self.responses.externally_dereferenced(loader),
            self.parameters.externally_dereferenced(loader),
            self.examples.externally_dereferenced(loader),
            self.request_bodies.externally_dereferenced(loader),
            self.headers.externally_dereferenced(loader),
            self.security_schemes.externally_dereferenced(loader),
            self.links.externally_dereferenced(loader),
            self.callbacks.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let value = Components {
            schemas: absorb(schemas, &mut components, &mut warnings)?,
            responses: absorb(responses, &mut components, &mut warnings)?,
            parameters: absorb(parameters, &mut components, &mut warnings)?,
            examples: absorb(examples, &mut components, &mut warnings)?,
            request_bodies: absorb(request_bodies, &mut components, &mut warnings)?,
            headers: absorb(headers, &mut components, &mut warnings)?,
            security_schemes: absorb(security_schemes, &mut components, &mut warnings)?,
            links: absorb(links, &mut components, &mut warnings)?,
            callbacks: absorb(callbacks, &mut components, &mut warnings)?,
        };
        Ok(ExternalResolution {
            value,
            components,
            warnings,
        })
    }
}

#[async_trait]
impl ExternallyDereferenceable for Document {
    async fn externally_dereferenced<L>(
        &self,
        loader: &L,
    ) -> Result<ExternalResolution<Self>, ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (paths, components_section) = futures::try_join!(
            self.paths.externally_dereferenced(loader),
            self.components.externally_dereferenced(loader),
        )?;

        let mut components = Components::new();
        let mut warnings = Vec::new();
        let mut document = self.clone();
        document.paths = absorb(paths, &mut components, &mut warnings)?;
        document.components = absorb(components_section, &mut components, &mut warnings)?;
        Ok(ExternalResolution {
            value: document,
            components,
            warnings,
        })
    }
}

/// Whole-document resolution conveniences.
#[async_trait]
pub trait ResolveDocument {
    /// Run the external pass: load every externally referenced document and
    /// fold the results into the document's own components section. Internal
    /// references are left for [`resolve_local`](ResolveDocument::resolve_local).
    async fn resolve_external<L>(
        &self,
        loader: &L,
    ) -> Result<(Document, Vec<String>), ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized;

    /// Run the local pass: inline every internal reference using the
    /// document's components section.
    fn resolve_local(&self) -> Result<DereferencedDocument, DereferenceError>;

    /// Run both passes in sequence, producing a fully inlined document.
    async fn resolve<L>(
        &self,
        loader: &L,
    ) -> Result<(DereferencedDocument, Vec<String>), ResolutionError>
    where
        L: ComponentLoader + ?Sized;
}

#[async_trait]
impl ResolveDocument for Document {
    async fn resolve_external<L>(
        &self,
        loader: &L,
    ) -> Result<(Document, Vec<String>), ExternalDereferenceError>
    where
        L: ComponentLoader + ?Sized,
    {
        let resolution = ExternallyDereferenceable::externally_dereferenced(self, loader).await?;
        let mut document = resolution.value;
        document.components.merge(&resolution.components)?;
        debug!(
            entries = document.components.entry_count(),
            warnings = resolution.warnings.len(),
            "external dereferencing complete"
        );
        Ok((document, resolution.warnings))
    }

    fn resolve_local(&self) -> Result<DereferencedDocument, DereferenceError> {
        self.dereferenced(&self.components)
    }

    async fn resolve<L>(
        &self,
        loader: &L,
    ) -> Result<(DereferencedDocument, Vec<String>), ResolutionError>
    where
        L: ComponentLoader + ?Sized,
    {
        let (document, warnings) = self.resolve_external(loader).await?;
        let dereferenced = document.resolve_local()?;
        Ok((dereferenced, warnings))
    }
}
