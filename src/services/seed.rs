//! Sample document set and the bulk loader that inserts it.

use crate::domain::errors::DomainResult;
use crate::domain::models::{Document, NewDocument};
use crate::services::document_service::DocumentService;

/// The built-in sample documents: (title, content, url).
const SAMPLE_DOCUMENTS: [(&str, &str, &str); 4] = [
    (
        "Getting Started with Next.js",
        "Next.js is a React framework that enables functionality such as server-side rendering and generating static websites. To get started, run 'npx create-next-app@latest' in your terminal. This will create a new Next.js application with all the necessary configuration files.",
        "https://nextjs.org/docs/getting-started",
    ),
    (
        "Understanding React Hooks",
        "React Hooks are functions that let you use state and other React features in functional components. The most commonly used hooks are useState for managing component state, useEffect for side effects, and useContext for consuming context values. Hooks must be called at the top level of your component.",
        "https://react.dev/learn/hooks",
    ),
    (
        "TypeScript Best Practices",
        "TypeScript provides static type checking for JavaScript. Some best practices include: always define types for function parameters and return values, use interfaces for object shapes, prefer type unions over any, and enable strict mode in your tsconfig.json for better type safety.",
        "https://typescript.org/docs",
    ),
    (
        "Database Design Principles",
        "Good database design follows several principles: normalize data to reduce redundancy, use appropriate data types, create proper indexes for query performance, establish foreign key relationships, and design with scalability in mind. Always consider the queries you'll need to perform when designing your schema.",
        "https://example.com/database-design",
    ),
];

pub fn sample_documents() -> Vec<NewDocument> {
    SAMPLE_DOCUMENTS
        .iter()
        .map(|(title, content, url)| NewDocument::new(*title, *content).with_url(*url))
        .collect()
}

/// Insert documents one at a time through the store's insert path.
///
/// Stops at the first failure; documents inserted before it stay stored.
/// `on_inserted` is called after each successful insert.
pub async fn seed_documents<F>(
    service: &DocumentService,
    documents: Vec<NewDocument>,
    mut on_inserted: F,
) -> DomainResult<Vec<Document>>
where
    F: FnMut(&Document),
{
    tracing::info!(count = documents.len(), "seeding documents");

    let mut added = Vec::with_capacity(documents.len());
    for document in documents {
        let stored = service.insert(document).await?;
        tracing::info!(id = stored.id, title = %stored.title, "seeded document");
        on_inserted(&stored);
        added.push(stored);
    }

    tracing::info!(count = added.len(), "seeding complete");
    Ok(added)
}

/// Seed the built-in sample documents.
pub async fn seed_sample_documents(service: &DocumentService) -> DomainResult<Vec<Document>> {
    seed_documents(service, sample_documents(), |_| {}).await
}
