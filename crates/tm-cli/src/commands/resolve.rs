use std::path::Path;

use colored::Colorize;
use tm_core::SessionId;

pub async fn run(
    store: &Path,
    username: &str,
    session: &str,
    option: &str,
) -> Result<(), String> {
    let session =
        SessionId::parse(session).ok_or_else(|| format!("invalid session id '{session}'"))?;
    let engine = super::open_engine(store)?;
    let profile = super::find_profile(&engine, username).await?;

    let result = engine
        .resolve_event(&profile.id, &session, option)
        .await
        .map_err(|e| e.to_string())?;

    if result.success {
        println!("  {}", "Success".green().bold());
    } else {
        println!("  {}", "Failure".red().bold());
    }
    if !result.narrative.is_empty() {
        println!();
        for line in result.narrative.lines() {
            println!("  {}", line.trim());
        }
    }

    let mut effects = Vec::new();
    if let Some(rewards) = &result.rewards {
        if let Some(ep) = &rewards.ep {
            for (key, amount) in ep {
                effects.push(format!("+{amount} EP {key}"));
            }
        }
        if let Some(life) = rewards.life {
            effects.push(format!("{life:+} life"));
        }
        if let Some(traits) = &rewards.traits {
            for name in traits {
                effects.push(format!("trait gained: {name}"));
            }
        }
        if let Some(achievement) = &rewards.achievement {
            effects.push(format!("achievement: {achievement}"));
        }
    }
    if let Some(penalties) = &result.penalties {
        if let Some(life) = penalties.life {
            effects.push(format!("{life:+} life"));
        }
        if let Some(traits) = &penalties.traits {
            for name in traits {
                effects.push(format!("trait lost: {name}"));
            }
        }
    }
    if !effects.is_empty() {
        println!();
        for effect in effects {
            println!("  {effect}");
        }
    }

    let after = engine.profile(&profile.id).await.map_err(|e| e.to_string())?;
    println!();
    println!("  life: {}/{}", after.life, after.max_life);

    Ok(())
}
