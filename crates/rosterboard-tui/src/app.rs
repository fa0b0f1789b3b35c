// Application orchestrator: receives user commands, calls into the core
// and pushes results back to the TUI.
//
// Core calls are synchronous and short (two small CSV files per rebuild),
// so they run inline on the app task.

use rosterboard_core::session::{Session, TableRequest};
use rosterboard_core::source::SourceError;
use tokio::sync::mpsc;
use tracing::{error, info};

use crate::protocol::{UiUpdate, UserCommand};

/// Run the app event loop until `Quit` arrives or the command channel closes.
pub async fn run(
    mut cmd_rx: mpsc::Receiver<UserCommand>,
    ui_tx: mpsc::Sender<UiUpdate>,
    session: Session,
) -> anyhow::Result<()> {
    info!(
        "Application event loop started (match mode: {:?})",
        session.match_mode()
    );

    loop {
        match cmd_rx.recv().await {
            Some(UserCommand::Quit) => {
                info!("Quit command received, shutting down");
                break;
            }
            Some(cmd) => {
                handle_user_command(&session, cmd, &ui_tx).await;
            }
            None => {
                info!("Command channel closed, shutting down");
                break;
            }
        }
    }

    Ok(())
}

async fn handle_user_command(session: &Session, cmd: UserCommand, ui_tx: &mpsc::Sender<UiUpdate>) {
    match cmd {
        UserCommand::Load(files) => {
            info!(
                "Loading roster {} and pool {}",
                files.roster.display(),
                files.pool.display()
            );
            match session.load(&files) {
                Ok(outcome) => {
                    let _ = ui_tx
                        .send(UiUpdate::Loaded {
                            files,
                            outcome: Box::new(outcome),
                        })
                        .await;
                }
                Err(e) => report_error(&e, ui_tx).await,
            }
        }
        UserCommand::ApplyTeam(request) => {
            info!("Applying team filter '{}'", request.team_filter);
            let request = TableRequest {
                order: None,
                ..request
            };
            rebuild(session, &request, ui_tx).await;
        }
        UserCommand::ApplySort(request) => {
            if let Some(spec) = &request.order {
                info!(
                    "Applying sort {} {:?}, group {} {:?}",
                    spec.sort_key, spec.sort_direction, spec.group_key, spec.group_direction
                );
            }
            rebuild(session, &request, ui_tx).await;
        }
        UserCommand::Quit => {}
    }
}

async fn rebuild(session: &Session, request: &TableRequest, ui_tx: &mpsc::Sender<UiUpdate>) {
    match session.rebuild(request) {
        Ok(rows) => {
            let _ = ui_tx.send(UiUpdate::Table(rows)).await;
        }
        Err(e) => report_error(&e, ui_tx).await,
    }
}

async fn report_error(e: &SourceError, ui_tx: &mpsc::Sender<UiUpdate>) {
    error!("{}", e);
    let _ = ui_tx
        .send(UiUpdate::Status(e.user_message().to_string()))
        .await;
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
