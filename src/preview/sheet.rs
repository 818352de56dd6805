use crate::foundation::error::LockshotResult;
use crate::style::sheet::{SheetResolver, Stylesheet};

/// Lock-screen styling of the preview card.
pub const PREVIEW_CSS: &str = r#"
* { box-sizing: border-box; }

.iphone {
  width: 390px;
  aspect-ratio: 390 / 644;
  border-radius: 40px;
  color: #fff;
  font-family: -apple-system, "Segoe UI", Roboto, Helvetica, Arial, sans-serif;
  padding: 24px 20px;
  position: relative;
  box-shadow: 0 30px 80px rgba(0, 0, 0, 0.4);
  overflow: hidden;
  background-position: center;
  background-size: cover;
  background-repeat: no-repeat;
}

.iphone-overlay {
  position: absolute;
  inset: 0;
  background: rgba(0, 0, 0, 0.35);
  z-index: 0;
  pointer-events: none;
}

.status-bar, .time, .notifications {
  position: relative;
  z-index: 1;
}

.status-bar {
  display: flex;
  justify-content: space-between;
  align-items: center;
  font-size: 14px;
}

.battery {
  display: flex;
  align-items: center;
  gap: 6px;
}

.battery-icon {
  width: 22px;
  height: 10px;
  border: 1.5px solid #fff;
  border-radius: 3px;
  position: relative;
}

.battery-tip {
  position: absolute;
  right: -4px;
  top: 2px;
  width: 2px;
  height: 6px;
  background: #fff;
  border-radius: 1px;
}

.battery-level {
  width: 90%;
  height: 100%;
  background: #4cd964;
  border-radius: 2px;
}

.time {
  margin-top: 40px;
  text-align: center;
}

.time h1 {
  font-size: 4.5rem;
  font-weight: 300;
  margin: 0;
}

.time span {
  font-size: 20px;
  opacity: 0.85;
}

.notifications {
  margin-top: 40px;
  display: flex;
  flex-direction: column;
  gap: 14px;
}

.notification {
  background: rgba(255, 255, 255, 0.18);
  backdrop-filter: blur(14px);
  border-radius: 18px;
  padding: 14px;
  display: flex;
  gap: 12px;
  align-items: center;
}

.badge {
  width: 45px;
  height: 45px;
  border-radius: 10px;
  background: #000;
  display: flex;
  align-items: center;
  justify-content: center;
  flex-shrink: 0;
  overflow: hidden;
}

.badge img {
  width: 100%;
  height: 100%;
  object-fit: contain;
}

.notification-content { flex: 1; }

.notification-header {
  display: flex;
  justify-content: space-between;
  font-size: 14px;
  margin-bottom: 4px;
  gap: 8px;
}

.notification-header strong { font-weight: 600; }

.notification-time {
  font-size: 12px;
  opacity: 0.75;
  white-space: nowrap;
}

.notification-text {
  font-size: 14px;
  opacity: 0.9;
}
"#;

pub fn preview_stylesheet() -> LockshotResult<Stylesheet> {
    Stylesheet::parse(PREVIEW_CSS)
}

/// Resolver with the user-agent defaults plus [`PREVIEW_CSS`].
pub fn preview_resolver() -> LockshotResult<SheetResolver> {
    Ok(SheetResolver::new(preview_stylesheet()?))
}
