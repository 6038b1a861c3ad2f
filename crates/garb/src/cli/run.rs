//! CLI command handlers.

use crate::cli::Commands;
use garb::{App, GenerationView, Identity};
use garb_core::{GenerationId, InspoImageId};
use garb_error::{DataError, DataErrorKind, GarbResult, StorageError, StorageErrorKind};
use std::path::Path;
use tokio::sync::broadcast::error::RecvError;

/// Execute one CLI command against the assembled app.
pub async fn handle_command(
    app: &App,
    identity: &Identity,
    command: Commands,
) -> GarbResult<()> {
    match command {
        Commands::Add {
            name,
            category,
            file,
        } => {
            let storage_id = ingest_file(app, &file).await?;
            let item = app
                .clothing_items
                .add(identity, name, category, storage_id)
                .await?;
            println!("Added {} ({}) as {}", item.name, item.category, item.id);
        }

        Commands::AddDefault {
            name,
            category,
            file,
        } => {
            let storage_id = ingest_file(app, &file).await?;
            let item = app
                .clothing_items
                .add_default(identity, name, category, storage_id)
                .await?;
            println!(
                "Added default {} ({}) as {}",
                item.name, item.category, item.id
            );
        }

        Commands::AddModel { name, file } => {
            let storage_id = ingest_file(app, &file).await?;
            let record = app.model_images.add(identity, name, storage_id).await?;
            println!("Added model image {} as {}", record.name, record.id);
        }

        Commands::AddInspo { name, file } => {
            let storage_id = ingest_file(app, &file).await?;
            let record = app.inspo_images.add(identity, name, storage_id).await?;
            println!("Added inspiration image {} as {}", record.name, record.id);
        }

        Commands::List { category } => {
            let items = app.clothing_items.list(identity, category).await?;
            if items.is_empty() {
                println!("No {category} yet");
            }
            for view in items {
                println!(
                    "{}  {}  {}",
                    view.item.id,
                    view.item.name,
                    view.image_url.as_deref().unwrap_or("(no image)")
                );
            }
        }

        Commands::Defaults => {
            let items = app.clothing_items.list_defaults().await?;
            if items.is_empty() {
                println!("No defaults yet");
            }
            for view in items {
                println!(
                    "{}  {}  {}  {}",
                    view.item.id,
                    view.item.name,
                    view.item.category,
                    view.image_url.as_deref().unwrap_or("(no image)")
                );
            }
        }

        Commands::Seed => {
            let outcome = app.clothing_items.seed(identity).await?;
            if outcome.seeded {
                println!("Seeded {} default items", outcome.count);
            } else {
                println!("Wardrobe already has items, nothing seeded");
            }
        }

        Commands::Models => {
            for view in app.model_images.list(identity).await? {
                let marker = if view.is_default { " (default)" } else { "" };
                println!(
                    "{}  {}{}  {}",
                    view.id.map(|id| id.to_string()).unwrap_or_default(),
                    view.name,
                    marker,
                    view.image_url.as_deref().unwrap_or("(no image)")
                );
            }
        }

        Commands::Inspo => {
            for view in app.inspo_images.list(identity).await? {
                println!(
                    "{}  {}  {}",
                    view.image.id,
                    view.image.name,
                    view.image_url.as_deref().unwrap_or("(no image)")
                );
            }
        }

        Commands::RemoveModel { id } => {
            app.model_images.remove(identity, &id).await?;
            println!("Removed model image {id}");
        }

        Commands::Outfit {
            top,
            bottom,
            model_image,
        } => {
            let id = app
                .generations
                .start_outfit(identity, top, bottom, model_image)
                .await?;
            wait_for_terminal(app, identity, id).await?;
        }

        Commands::Nano {
            occasion,
            model_image,
        } => {
            let id = app
                .generations
                .start_nano(identity, &occasion, model_image)
                .await?;
            wait_for_terminal(app, identity, id).await?;
        }

        Commands::Transfer {
            inspiration,
            model_image,
        } => {
            let storage_id = resolve_inspiration(app, identity, &inspiration).await?;
            let id = app
                .generations
                .start_transfer(identity, storage_id, model_image)
                .await?;
            wait_for_terminal(app, identity, id).await?;
        }

        Commands::Latest => match app.generations.latest(identity).await? {
            Some(view) => print_generation(&view),
            None => println!("No generations yet"),
        },

        Commands::Quota => {
            let status = app.generations.quota(identity).await?;
            println!("Used {} of {} generations today", status.used, status.limit);
        }
    }
    Ok(())
}

/// Store a local image file and return its blob reference.
async fn ingest_file(app: &App, path: &Path) -> GarbResult<garb_core::ImageId> {
    let data = tokio::fs::read(path).await.map_err(|e| {
        StorageError::new(StorageErrorKind::FileRead(format!(
            "{}: {}",
            path.display(),
            e
        )))
    })?;
    app.images.store(&data, mime_for(path)).await
}

fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        _ => "image/jpeg",
    }
}

async fn resolve_inspiration(
    app: &App,
    identity: &Identity,
    id: &InspoImageId,
) -> GarbResult<garb_core::ImageId> {
    let views = app.inspo_images.list(identity).await?;
    views
        .into_iter()
        .find(|view| view.image.id == *id)
        .map(|view| view.image.storage_id)
        .ok_or_else(|| {
            DataError::new(DataErrorKind::NotFound(format!(
                "inspiration image {id}"
            )))
            .into()
        })
}

/// Block until the generation reaches a terminal state, re-reading on each
/// change event, then print the result.
async fn wait_for_terminal(
    app: &App,
    identity: &Identity,
    id: GenerationId,
) -> GarbResult<()> {
    println!("Started generation {id}");
    let mut events = app.generations.subscribe();

    loop {
        let Some(view) = app.generations.get(identity, &id).await? else {
            println!("Generation {id} was removed");
            return Ok(());
        };
        if view.generation.state.is_terminal() {
            print_generation(&view);
            return Ok(());
        }

        match events.recv().await {
            Ok(_) => {}
            Err(RecvError::Lagged(_)) => {}
            Err(RecvError::Closed) => {
                println!("Event stream closed while waiting for {id}");
                return Ok(());
            }
        }
    }
}

fn print_generation(view: &GenerationView) {
    let generation = &view.generation;
    println!(
        "{}  {}  {}",
        generation.id,
        generation.mode,
        generation.state.status()
    );
    if let Some(error) = generation.state.error_message() {
        println!("  error: {error}");
    }
    if let Some(url) = &view.image_url {
        println!("  image: {url}");
    }
}
