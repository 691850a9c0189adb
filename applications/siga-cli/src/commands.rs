//! Command handlers
//!
//! Every command goes through the state containers, so failures print the
//! same user-facing message the containers record.

use crate::app::App;
use crate::cli::{
    Commands, EventCommand, FinanceCommand, Filters, MemberCommand, StoreCommand,
};
use crate::render;
use anyhow::{bail, Context};
use siga_core::validate::validate_member_form;
use siga_core::{
    CreateEvent, CreateMember, CreateTransaction, Entity, SigaError, UpdateEvent, UpdateMember,
    UpdateTransaction,
};
use siga_state::Container;
use siga_storage::transactions::{summarize, TransactionFilter};
use siga_storage::{events, members};
use std::io::Write;

pub async fn run(app: &App, command: Commands, out: &mut impl Write) -> anyhow::Result<()> {
    match command {
        Commands::Members(cmd) => run_members(app, cmd, out).await,
        Commands::Events(cmd) => run_events(app, cmd, out).await,
        Commands::Finance(cmd) => run_finance(app, cmd, out).await,
        Commands::Store(cmd) => run_store(app, cmd, out).await,
        Commands::Whoami => whoami(app, out).await,
    }
}

/// Attach the container's recorded message to a failure
fn surface<E: Entity>(container: &Container<E>, err: SigaError) -> anyhow::Error {
    let message = container.error().unwrap_or_else(|| err.to_string());
    anyhow::Error::new(err).context(message)
}

async fn loaded<E: Entity>(container: &Container<E>) -> anyhow::Result<Vec<E>> {
    container
        .load()
        .await
        .map_err(|err| surface(container, err))?;
    Ok(container.items())
}

async fn run_members(app: &App, cmd: MemberCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let container = &app.members;

    match cmd {
        MemberCommand::List { status } => {
            for m in loaded(container).await? {
                if status.map_or(true, |s| m.status == s) {
                    writeln!(out, "{}", render::member(&m))?;
                }
            }
        }
        MemberCommand::Show { id } => {
            match container.get_by_id(&id).await.map_err(|e| surface(container, e))? {
                Some(m) => writeln!(out, "{}", render::member(&m))?,
                None => bail!("Miembro no encontrado: {id}"),
            }
        }
        MemberCommand::Add(args) => {
            let draft = CreateMember {
                id: args.id,
                name: args.name,
                email: args.email,
                phone: args.phone,
                address: args.address,
                profession: args.profession,
                membership_type: args.membership_type,
                join_date: args.join_date,
                status: args.status,
                payment_status: args.payment_status,
            };

            let errors = validate_member_form(&draft);
            if !errors.is_empty() {
                let details: Vec<_> = errors
                    .iter()
                    .map(|(field, message)| format!("{field}: {message}"))
                    .collect();
                bail!("Formulario inválido: {}", details.join("; "));
            }

            let created = container
                .create(draft)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "{}", render::member(&created))?;
        }
        MemberCommand::Update { id, fields } => {
            let patch = UpdateMember {
                name: fields.name,
                email: fields.email,
                phone: fields.phone.map(Some),
                address: fields.address.map(Some),
                profession: fields.profession.map(Some),
                membership_type: fields.membership_type,
                join_date: fields.join_date.map(Some),
                status: fields.status,
                payment_status: fields.payment_status.map(Some),
            };
            let updated = container
                .update(&id, patch)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "{}", render::member(&updated))?;
        }
        MemberCommand::Remove { id } => {
            container
                .delete(&id)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "removed {id}")?;
        }
        MemberCommand::Search { query } => {
            for m in loaded(container).await? {
                if members::matches(&m, &query) {
                    writeln!(out, "{}", render::member(&m))?;
                }
            }
        }
        MemberCommand::Stats => {
            let items = loaded(container).await?;
            writeln!(out, "{}", render::member_stats(&members::stats_of(&items)))?;
        }
    }

    Ok(())
}

async fn run_events(app: &App, cmd: EventCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let container = &app.events;

    match cmd {
        EventCommand::List => {
            for e in loaded(container).await? {
                writeln!(out, "{}", render::event(&e))?;
            }
        }
        EventCommand::Show { id } => {
            match container.get_by_id(&id).await.map_err(|e| surface(container, e))? {
                Some(e) => writeln!(out, "{}", render::event(&e))?,
                None => bail!("Evento no encontrado: {id}"),
            }
        }
        EventCommand::Add(args) => {
            let draft = CreateEvent {
                id: args.id,
                title: args.title,
                date: args.date,
                location: args.location,
                description: args.description,
                capacity: args.capacity,
                status: args.status,
                category: args.category,
            };
            let created = container
                .create(draft)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "{}", render::event(&created))?;
        }
        EventCommand::Update { id, fields } => {
            let patch = UpdateEvent {
                title: fields.title,
                date: fields.date,
                location: fields.location.map(Some),
                description: fields.description.map(Some),
                capacity: fields.capacity.map(Some),
                status: fields.status,
                category: fields.category.map(Some),
            };
            let updated = container
                .update(&id, patch)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "{}", render::event(&updated))?;
        }
        EventCommand::Remove { id } => {
            container
                .delete(&id)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "removed {id}")?;
        }
        EventCommand::Between { from, to } => {
            for e in loaded(container).await? {
                if events::within(&e, from, to) {
                    writeln!(out, "{}", render::event(&e))?;
                }
            }
        }
        EventCommand::Search { query } => {
            for e in loaded(container).await? {
                if events::matches(&e, &query) {
                    writeln!(out, "{}", render::event(&e))?;
                }
            }
        }
    }

    Ok(())
}

fn filter_from(filters: Filters) -> TransactionFilter {
    TransactionFilter {
        kind: filters.kind,
        status: filters.status,
        month: filters.month,
    }
}

async fn run_finance(app: &App, cmd: FinanceCommand, out: &mut impl Write) -> anyhow::Result<()> {
    let container = &app.transactions;

    match cmd {
        FinanceCommand::List(filters) => {
            let filter = filter_from(filters);
            for t in loaded(container).await? {
                if filter.matches(&t) {
                    writeln!(out, "{}", render::transaction(&t))?;
                }
            }
        }
        FinanceCommand::Add(args) => {
            let draft = CreateTransaction {
                id: args.id,
                kind: args.kind,
                category: args.category,
                description: args.description,
                amount: args.amount,
                date: args.date,
                status: args.status,
            };
            let created = container
                .create(draft)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "{}", render::transaction(&created))?;
        }
        FinanceCommand::Update { id, fields } => {
            let patch = UpdateTransaction {
                kind: fields.kind,
                category: fields.category,
                description: fields.description,
                amount: fields.amount,
                date: fields.date,
                status: fields.status,
            };
            let updated = container
                .update(&id, patch)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "{}", render::transaction(&updated))?;
        }
        FinanceCommand::Remove { id } => {
            container
                .delete(&id)
                .await
                .map_err(|e| surface(container, e))?;
            writeln!(out, "removed {id}")?;
        }
        FinanceCommand::Summary(filters) => {
            let filter = filter_from(filters);
            let matching: Vec<_> = loaded(container)
                .await?
                .into_iter()
                .filter(|t| filter.matches(t))
                .collect();
            writeln!(out, "{}", render::summary(&summarize(&matching)))?;
        }
    }

    Ok(())
}

async fn run_store(app: &App, cmd: StoreCommand, out: &mut impl Write) -> anyhow::Result<()> {
    match cmd {
        StoreCommand::Reset => {
            let store = app.store("store reset")?;
            let snapshot = store.reset().await?;
            writeln!(
                out,
                "store reset: {} members, {} events, {} transactions",
                snapshot.members.len(),
                snapshot.events.len(),
                snapshot.transactions.len()
            )?;
        }
        StoreCommand::Export { output } => {
            let store = app.store("store export")?;
            let snapshot = store.load().await?;
            let json = serde_json::to_string_pretty(&snapshot)?;

            match output {
                Some(path) => {
                    tokio::fs::write(&path, json)
                        .await
                        .with_context(|| format!("writing {}", path.display()))?;
                    writeln!(out, "exported to {}", path.display())?;
                }
                None => writeln!(out, "{json}")?,
            }
        }
    }

    Ok(())
}

async fn whoami(app: &App, out: &mut impl Write) -> anyhow::Result<()> {
    match app.auth.restore_session().await? {
        Some(user) => {
            let name = user.display_name.as_deref().unwrap_or(&user.email);
            let role = app.auth.role().unwrap_or_default();
            writeln!(out, "{name} <{}>\trole {role}", user.email)?;
        }
        None => writeln!(out, "no operator configured")?,
    }
    Ok(())
}
