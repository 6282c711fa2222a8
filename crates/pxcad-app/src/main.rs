//! PXCAD 主应用程序入口
//!
//! 无窗口运行：按脚本驱动交互层完成一次编辑会话，重绘到内存像素缓冲区，
//! 可选输出为 PNG 文件。

use anyhow::{Context, Result};
use clap::Parser;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use pxcad_core::config::EditorConfig;
use pxcad_renderer::{draw_clip_preview, redraw_scene, PixelBuffer, RenderStyle};
use pxcad_ui::{CanvasEvent, EventDispatcher, Key, Mode, Modifiers, ToolResult};

/// 命令行参数
#[derive(Debug, Parser)]
#[command(name = "pxcad", version, about = "PXCAD headless editing session")]
struct Args {
    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,

    /// JSON editor config
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Write the final canvas as PNG
    #[arg(long, value_name = "PATH")]
    png: Option<PathBuf>,
}

fn load_config(path: Option<&PathBuf>) -> Result<EditorConfig> {
    let config = match path {
        Some(path) => EditorConfig::from_path(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => EditorConfig::default(),
    };
    config.validate()?;
    Ok(config)
}

/// 演示会话：绘制、选择、移动、缩放、旋转、裁剪
fn run_session(app: &mut EventDispatcher) -> usize {
    let shift = Modifiers::SHIFT;
    let steps: Vec<(Option<Mode>, Vec<CanvasEvent>)> = vec![
        (
            Some(Mode::LineDda),
            vec![CanvasEvent::down(60, 80), CanvasEvent::down(420, 260)],
        ),
        (
            Some(Mode::LineBresenham),
            vec![
                CanvasEvent::down(80, 400),
                CanvasEvent::down(700, 120),
                CanvasEvent::down(200, 600),
                CanvasEvent::down(240, 20),
            ],
        ),
        (
            Some(Mode::CircleBresenham),
            vec![CanvasEvent::down(520, 420), CanvasEvent::down(580, 500)],
        ),
        // 框选前两条线段，再整体移动
        (
            None,
            vec![
                CanvasEvent::key(Key::Char('v')),
                CanvasEvent::down(40, 60),
                CanvasEvent::moved(300, 420),
                CanvasEvent::up(300, 420),
                CanvasEvent::down(240, 170),
                CanvasEvent::moved(250, 180),
                CanvasEvent::up(260, 190),
            ],
        ),
        // 移动后包围盒为 (80,100)-(720,420)，Shift 拖动 se 控制柄等比缩小
        (
            None,
            vec![
                CanvasEvent::down(720, 420),
                CanvasEvent::moved(680, 400).with_modifiers(shift),
                CanvasEvent::up(620, 380).with_modifiers(shift),
            ],
        ),
        // 以 15° 吸附旋转
        (
            Some(Mode::Rotate),
            vec![
                CanvasEvent::down(600, 300),
                CanvasEvent::moved(560, 200).with_modifiers(shift),
                CanvasEvent::up(540, 180).with_modifiers(shift),
            ],
        ),
        // 裁剪窗口 + Liang-Barsky 预览，然后应用
        (
            None,
            vec![
                CanvasEvent::key(Key::Char('2')),
                CanvasEvent::down(150, 100),
                CanvasEvent::moved(400, 300),
                CanvasEvent::up(450, 350),
                CanvasEvent::key(Key::Right).with_modifiers(shift),
            ],
        ),
    ];

    let mut changes = 0;
    for (mode, events) in steps {
        if let Some(mode) = mode {
            app.set_mode(mode);
        }
        for event in &events {
            if app.handle(event) == ToolResult::SceneChanged {
                changes += 1;
            }
        }
        info!("[{}] {}", app.mode().name(), app.state().status);
    }
    changes
}

fn main() -> Result<()> {
    let args = Args::parse();

    // 初始化日志
    let level = if args.verbose { Level::DEBUG } else { Level::INFO };
    tracing::subscriber::set_global_default(FmtSubscriber::builder().with_max_level(level).finish())?;

    info!("Starting PXCAD...");

    let config = load_config(args.config.as_ref())?;
    let style = RenderStyle::default();
    let mut surface = PixelBuffer::new(config.canvas_width, config.canvas_height, style.background)?;
    let mut app = EventDispatcher::new(config);

    let changes = run_session(&mut app);
    info!(
        "Session finished: {} scene changes, {} primitives",
        changes,
        app.scene().len()
    );

    // 应用前的预览叠加
    let mut stats = redraw_scene(&mut surface, app.scene(), &style);
    if let (Some(window), Some(algorithm)) = (app.state().clip.window, app.state().clip.preview) {
        let preview = draw_clip_preview(
            &mut surface,
            app.scene(),
            window,
            algorithm,
            Some(&app.state().selection.selected.lines),
            &style,
        );
        info!("{} preview in {}: {} pixels", algorithm.name(), window, preview.plotted);
    }

    if app.handle(&CanvasEvent::key(Key::Enter)) == ToolResult::SceneChanged {
        info!("{}", app.state().status);
        stats = redraw_scene(&mut surface, app.scene(), &style);
    } else {
        warn!("Nothing to apply");
    }
    info!("{} pixels plotted, {} dropped", stats.plotted, stats.dropped);

    if let Some(path) = args.png {
        let file = File::create(&path).with_context(|| format!("failed to create {}", path.display()))?;
        let mut out = BufWriter::new(file);
        surface
            .write_png(&mut out)
            .with_context(|| format!("failed to encode {}", path.display()))?;
        out.flush()?;
        info!("Wrote {}", path.display());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_args_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_parse_flags() {
        let args = Args::try_parse_from(["pxcad", "-v", "--config", "cfg.json", "--png", "out.png"]).unwrap();
        assert!(args.verbose);
        assert_eq!(args.config, Some(PathBuf::from("cfg.json")));
        assert_eq!(args.png, Some(PathBuf::from("out.png")));

        let args = Args::try_parse_from(["pxcad"]).unwrap();
        assert!(!args.verbose);
        assert!(args.config.is_none() && args.png.is_none());
    }

    #[test]
    fn test_rejects_unknown_flag() {
        assert!(Args::try_parse_from(["pxcad", "--ppm", "out.ppm"]).is_err());
        assert!(Args::try_parse_from(["pxcad", "--png"]).is_err());
    }
}
