//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands. Each
//! function takes parsed arguments, drives the session through
//! `orrery-graph` calls, and prints the result in text or JSON.

use anyhow::Result;

use super::args::{
    CompleteArgs, ExportArgs, ImportArgs, InfoArgs, InitArgs, LinkArgs, ListArgs, LoadArgs,
    NextArgs, NoteArgs, PathArgs, ReopenArgs, ResetArgs, ResourceAction, ResourceArgs, ShowArgs,
    StatsArgs, StudyArgs, TreeArgs,
};
use crate::output::OutputMode;
use orrery_graph::{TopicGraph, TopicStatus};

/// Count nodes per stored status in one pass.
fn status_counts(graph: &TopicGraph) -> (usize, usize, usize) {
    graph
        .nodes
        .iter()
        .fold((0, 0, 0), |(orbit, completed, locked), node| {
            match node.status {
                TopicStatus::Orbit => (orbit + 1, completed, locked),
                TopicStatus::Completed => (orbit, completed + 1, locked),
                TopicStatus::Locked => (orbit, completed, locked + 1),
            }
        })
}

/// Execute the init command
pub async fn execute_init(args: &InitArgs) -> Result<()> {
    use crate::commands::init;

    let current_dir = std::env::current_dir()?;

    if !args.quiet {
        println!("Initializing orrery workspace...");
    }

    let result = init::init(&current_dir, args.force).await?;

    if !args.quiet {
        println!("Initialized orrery in {}", result.orrery_dir.display());
        println!("  Config:  {}", result.config_file.display());
        println!("  Session: {}", result.session_file.display());
    }

    Ok(())
}

/// Execute the load command
pub async fn execute_load(
    app: &mut crate::app::App,
    args: &LoadArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use orrery_graph::{calculate_orbits_with, parse_syllabus, ParsedSyllabus};

    let text = match (&args.file, &args.template) {
        (Some(path), None) => tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", path.display(), e))?,
        (None, Some(template)) => template.text().to_string(),
        (None, None) => anyhow::bail!("Provide a syllabus file or --template NAME"),
        (Some(_), Some(_)) => {
            anyhow::bail!("Provide either a syllabus file or --template, not both")
        }
    };

    let ParsedSyllabus {
        mut graph,
        unresolved,
    } = parse_syllabus(&text);

    if graph.is_empty() {
        anyhow::bail!("Syllabus contains no topics");
    }

    for missing in &unresolved {
        tracing::warn!(
            dependency = %missing.name,
            topic = %missing.topic,
            "Unresolved dependency dropped"
        );
    }

    let mut jitter = app.jitter();
    calculate_orbits_with(&mut graph.nodes, &graph.edges, jitter.as_mut());

    let topics = graph.len();
    let edges = graph.edges.len();

    let session = app.session_mut();
    session.graph = graph;
    session.syllabus_text = text;
    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            let unresolved: Vec<serde_json::Value> = unresolved
                .iter()
                .map(|u| serde_json::json!({ "topic": u.topic, "dependency": u.name }))
                .collect();
            output::print_json(&serde_json::json!({
                "topics": topics,
                "edges": edges,
                "unresolved": unresolved,
            }))?;
        }
        output::OutputMode::Text => {
            println!("Loaded {} topic(s), {} edge(s).", topics, edges);
            if !unresolved.is_empty() {
                println!(
                    "Skipped {} unresolved dependency reference(s).",
                    unresolved.len()
                );
            }
        }
    }

    Ok(())
}

/// Execute the info command
pub async fn execute_info(
    app: &crate::app::App,
    _args: &InfoArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let session = app.session();
    let graph = &session.graph;
    let (orbit, completed, locked) = status_counts(graph);

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "sessionPath": app.session_path().display().to_string(),
                "savedAt": session.saved_at,
                "topics": {
                    "total": graph.len(),
                    "orbit": orbit,
                    "completed": completed,
                    "locked": locked,
                },
                "edges": graph.edges.len(),
            }))?;
        }
        output::OutputMode::Text => {
            println!("Orrery Workspace Information");
            println!("============================");
            println!();
            println!("Session: {}", app.session_path().display());
            println!("Saved:   {}", session.saved_at.format("%Y-%m-%d %H:%M"));
            println!();
            println!(
                "Topics: {} total ({} in orbit, {} completed, {} locked), {} edge(s)",
                graph.len(),
                orbit,
                completed,
                locked,
                graph.edges.len()
            );
        }
    }

    Ok(())
}

/// Execute the list command
pub async fn execute_list(
    app: &crate::app::App,
    args: &ListArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let status_filter = args.status.map(TopicStatus::from);
    let graph = &app.session().graph;

    let topics: Vec<_> = graph
        .nodes
        .iter()
        .filter(|n| status_filter.map_or(true, |s| n.status == s))
        .filter(|n| args.depth.map_or(true, |d| n.depth == d))
        .collect();

    output::print_topics(&topics, output_mode)?;

    Ok(())
}

/// Execute the show command
pub async fn execute_show(
    app: &crate::app::App,
    args: &ShowArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let graph = &app.session().graph;
    let node = graph
        .node_by_name(&args.name)
        .ok_or_else(|| crate::error::Error::TopicNotFound(args.name.clone()))?;

    let prerequisites = graph.prerequisites_of(&node.id);
    let dependents = graph.dependents_of(&node.id);

    output::print_topic_details(node, &prerequisites, &dependents, output_mode)?;

    Ok(())
}

/// Execute the tree command
pub async fn execute_tree(
    app: &crate::app::App,
    args: &TreeArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use std::io::Write;

    let root = app.resolve_topic(&args.name)?;
    let graph = &app.session().graph;

    let max_depth = if args.depth == 0 {
        None
    } else {
        Some(args.depth)
    };
    let tree = output::TopicTreeNode::build(graph, &root, max_depth)
        .ok_or_else(|| crate::error::Error::TopicNotFound(args.name.clone()))?;
    let unlocks = graph.dependents_of(&root);

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&output::topic_tree_to_json_public(&tree, &unlocks))?;
        }
        output::OutputMode::Text => {
            output::print_topic_tree(&tree, output_mode)?;
            if !unlocks.is_empty() {
                let stdout = std::io::stdout();
                let mut handle = stdout.lock();
                let config = output::OutputConfig::from_env();
                writeln!(handle)?;
                output::print_topic_tree_unlocks(&mut handle, &unlocks, &config)?;
            }
        }
    }

    Ok(())
}

/// Execute the path command
pub async fn execute_path(
    app: &crate::app::App,
    args: &PathArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let from = app.resolve_topic(&args.from)?;
    let to = app.resolve_topic(&args.to)?;
    let graph = &app.session().graph;

    match orrery_graph::find_path(graph, &from, &to) {
        Some(path) => output::print_study_path(graph, &path, output_mode)?,
        None => match output_mode {
            output::OutputMode::Json => {
                output::print_json(&serde_json::json!({
                    "found": false,
                    "from": args.from,
                    "to": args.to,
                }))?;
            }
            output::OutputMode::Text => {
                println!("No study path from '{}' to '{}'.", args.from, args.to);
            }
        },
    }

    Ok(())
}

/// Execute the link command
pub async fn execute_link(
    app: &mut crate::app::App,
    args: &LinkArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use orrery_graph::EdgeOutcome;

    let source = app.resolve_topic(&args.source)?;
    let target = app.resolve_topic(&args.target)?;

    let mut jitter = app.jitter();
    let outcome = app
        .session_mut()
        .graph
        .add_edge_with(&source, &target, jitter.as_mut())?;

    if outcome == EdgeOutcome::Added {
        app.save().await?;
    }

    match output_mode {
        output::OutputMode::Json => {
            let status = match outcome {
                EdgeOutcome::Added => "added",
                EdgeOutcome::Duplicate => "duplicate",
            };
            output::print_json(&serde_json::json!({
                "status": status,
                "source": args.source,
                "target": args.target,
            }))?;
        }
        output::OutputMode::Text => match outcome {
            EdgeOutcome::Added => println!("Linked '{}' -> '{}'", args.source, args.target),
            EdgeOutcome::Duplicate => {
                println!("Link already exists: '{}' -> '{}'", args.source, args.target);
            }
        },
    }

    Ok(())
}

/// Execute the complete command
pub async fn execute_complete(
    app: &mut crate::app::App,
    args: &CompleteArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use orrery_graph::progress;
    use std::collections::HashSet;

    let id = app.resolve_topic(&args.name)?;

    let ready_before: HashSet<_> = progress::recommended_topics(&app.session().graph, usize::MAX)
        .into_iter()
        .map(|n| n.id.clone())
        .collect();

    app.session_mut().graph.mark_complete(&id)?;

    // Stored statuses stay as the user set them; readiness is derived, so
    // newly reachable topics are the difference between the two snapshots.
    let unlocked: Vec<String> = progress::recommended_topics(&app.session().graph, usize::MAX)
        .into_iter()
        .filter(|n| !ready_before.contains(&n.id))
        .map(|n| n.name.clone())
        .collect();

    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "id": id,
                "name": args.name,
                "status": TopicStatus::Completed,
                "unlocked": unlocked,
            }))?;
        }
        output::OutputMode::Text => {
            println!("Completed '{}'", args.name);
            if !unlocked.is_empty() {
                println!("Unlocked: {}", unlocked.join(", "));
            }
        }
    }

    Ok(())
}

/// Execute the reopen command
pub async fn execute_reopen(
    app: &mut crate::app::App,
    args: &ReopenArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let id = app.resolve_topic(&args.name)?;
    app.session_mut().graph.mark_incomplete(&id)?;
    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "id": id,
                "name": args.name,
                "status": TopicStatus::Orbit,
            }))?;
        }
        output::OutputMode::Text => {
            println!("Reopened '{}'", args.name);
        }
    }

    Ok(())
}

/// Execute the note command
pub async fn execute_note(
    app: &mut crate::app::App,
    args: &NoteArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let id = app.resolve_topic(&args.name)?;
    app.session_mut().graph.set_notes(&id, args.text.clone())?;
    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "id": id,
                "name": args.name,
                "notes": args.text,
            }))?;
        }
        output::OutputMode::Text => {
            println!("Updated notes for '{}'", args.name);
        }
    }

    Ok(())
}

/// Execute the resource command
pub async fn execute_resource(
    app: &mut crate::app::App,
    args: &ResourceArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    match &args.action {
        ResourceAction::Add { name, url, title } => {
            let id = app.resolve_topic(name)?;
            let title = title.clone().unwrap_or_else(|| url.clone());

            let added = app
                .session_mut()
                .graph
                .add_resource(&id, url.clone(), title.clone())?;
            if added {
                app.save().await?;
            }

            match output_mode {
                output::OutputMode::Json => {
                    output::print_json(&serde_json::json!({
                        "name": name,
                        "url": url,
                        "title": title,
                        "added": added,
                    }))?;
                }
                output::OutputMode::Text => {
                    if added {
                        println!("Added resource to '{}': {}", name, url);
                    } else {
                        println!("Resource already attached: {}", url);
                    }
                }
            }
        }
        ResourceAction::Remove { name, url } => {
            let id = app.resolve_topic(name)?;

            let removed = app.session_mut().graph.remove_resource(&id, url)?;
            if removed {
                app.save().await?;
            }

            match output_mode {
                output::OutputMode::Json => {
                    output::print_json(&serde_json::json!({
                        "name": name,
                        "url": url,
                        "removed": removed,
                    }))?;
                }
                output::OutputMode::Text => {
                    if removed {
                        println!("Removed resource from '{}': {}", name, url);
                    } else {
                        println!("No such resource on '{}': {}", name, url);
                    }
                }
            }
        }
        ResourceAction::List { name } => {
            let graph = &app.session().graph;
            let node = graph
                .node_by_name(name)
                .ok_or_else(|| crate::error::Error::TopicNotFound(name.clone()))?;

            match output_mode {
                output::OutputMode::Json => {
                    output::print_json(&node.resources)?;
                }
                output::OutputMode::Text => {
                    if node.resources.is_empty() {
                        println!("'{}' has no resources.", name);
                    } else {
                        println!("Resources for '{}' ({}):", name, node.resources.len());
                        println!();
                        for resource in &node.resources {
                            println!("  {}  {}", resource.title, resource.url);
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

/// Execute the study command
pub async fn execute_study(
    app: &mut crate::app::App,
    args: &StudyArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let id = app.resolve_topic(&args.name)?;
    app.session_mut().graph.add_study_time(&id, args.minutes)?;

    let total = app
        .session()
        .graph
        .node(&id)
        .and_then(|n| n.study_time)
        .unwrap_or(0);

    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "id": id,
                "name": args.name,
                "minutes": args.minutes,
                "totalMinutes": total,
            }))?;
        }
        output::OutputMode::Text => {
            println!(
                "Logged {} min on '{}' ({} min total)",
                args.minutes, args.name, total
            );
        }
    }

    Ok(())
}

/// Execute the next command
pub async fn execute_next(
    app: &crate::app::App,
    args: &NextArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use orrery_graph::progress;

    let limit = args.limit.unwrap_or(app.config().recommend_limit);
    let recommended = progress::recommended_topics(&app.session().graph, limit);

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&recommended)?;
        }
        output::OutputMode::Text => {
            if recommended.is_empty() {
                println!("No topics ready to study.");
            } else {
                println!("Next up ({} topic(s)):", recommended.len());
                println!();
                for topic in &recommended {
                    output::print_topic(topic, output_mode)?;
                }
            }
        }
    }

    Ok(())
}

/// Execute the stats command
pub async fn execute_stats(
    app: &crate::app::App,
    args: &StatsArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use orrery_graph::progress;

    let graph = &app.session().graph;
    let (orbit, completed, locked) = status_counts(graph);
    let ready = progress::recommended_topics(graph, usize::MAX).len();
    let percent = progress::completion_percent(graph);
    let minutes = progress::total_study_time(graph);
    let streak = progress::study_streak(graph);

    match output_mode {
        output::OutputMode::Json => {
            let mut json = serde_json::json!({
                "total": graph.len(),
                "byStatus": {
                    "orbit": orbit,
                    "completed": completed,
                    "locked": locked,
                },
                "ready": ready,
                "completionPercent": percent,
                "studyMinutes": minutes,
                "streakDays": streak,
            });
            if args.detailed {
                json["layers"] = serde_json::json!(progress::layer_sizes(graph));
            }
            output::print_json(&json)?;
        }
        output::OutputMode::Text => {
            println!("Study Statistics");
            println!("================");
            println!();
            println!(
                "Topics:     {} total ({} in orbit, {} completed, {} locked)",
                graph.len(),
                orbit,
                completed,
                locked
            );
            println!("Ready now:  {}", ready);
            println!("Completion: {}%", percent);
            println!("Study time: {} min", minutes);
            println!("Streak:     {} day(s)", streak);

            if args.detailed {
                println!();
                println!("Topics per layer:");
                for (depth, count) in progress::layer_sizes(graph) {
                    println!("  L{}: {} topic(s)", depth, count);
                }
            }
        }
    }

    Ok(())
}

/// Execute the export command
pub async fn execute_export(
    app: &crate::app::App,
    args: &ExportArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;

    let payload = app.session().export();

    match &args.output {
        Some(path) => {
            let contents = serde_json::to_string_pretty(&payload)?;
            tokio::fs::write(path, contents).await?;

            match output_mode {
                output::OutputMode::Json => {
                    output::print_json(&serde_json::json!({
                        "exported": payload.nodes.len(),
                        "file": path.display().to_string(),
                    }))?;
                }
                output::OutputMode::Text => {
                    println!(
                        "Exported {} topic(s) to {}",
                        payload.nodes.len(),
                        path.display()
                    );
                }
            }
        }
        None => {
            // Payload on stdout in both modes; the file is the product.
            output::print_json(&payload)?;
        }
    }

    Ok(())
}

/// Execute the import command
pub async fn execute_import(
    app: &mut crate::app::App,
    args: &ImportArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use crate::session::{ExportPayload, Session, EXPORT_VERSION};

    let contents = tokio::fs::read_to_string(&args.file)
        .await
        .map_err(|e| anyhow::anyhow!("Cannot read {}: {}", args.file.display(), e))?;

    let payload: ExportPayload = serde_json::from_str(&contents)
        .map_err(|e| anyhow::anyhow!("{} is not an orrery export: {}", args.file.display(), e))?;

    if !payload.version.is_empty() && payload.version != EXPORT_VERSION {
        tracing::warn!(
            version = %payload.version,
            expected = EXPORT_VERSION,
            "Importing a payload with a different version"
        );
    }

    let topics = payload.nodes.len();
    let edges = payload.edges.len();

    *app.session_mut() = Session::from_payload(payload);
    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "imported": topics,
                "edges": edges,
                "file": args.file.display().to_string(),
            }))?;
        }
        output::OutputMode::Text => {
            println!(
                "Imported {} topic(s), {} edge(s) from {}",
                topics,
                edges,
                args.file.display()
            );
        }
    }

    Ok(())
}

/// Execute the reset command
pub async fn execute_reset(
    app: &mut crate::app::App,
    args: &ResetArgs,
    output_mode: OutputMode,
) -> Result<()> {
    use crate::output;
    use crate::session::Session;

    let topics = app.session().graph.len();

    // Confirm unless --force is used
    if !args.force {
        eprint!("Reset the session and discard {} topic(s)? [y/N]: ", topics);
        let mut input = String::new();
        std::io::stdin().read_line(&mut input)?;
        let response = input.trim().to_lowercase();
        if response != "y" && response != "yes" {
            println!("Reset cancelled.");
            return Ok(());
        }
    }

    *app.session_mut() = Session::default();
    app.save().await?;

    match output_mode {
        output::OutputMode::Json => {
            output::print_json(&serde_json::json!({
                "reset": true,
                "discarded": topics,
            }))?;
        }
        output::OutputMode::Text => {
            println!("Reset session ({} topic(s) discarded)", topics);
        }
    }

    Ok(())
}
