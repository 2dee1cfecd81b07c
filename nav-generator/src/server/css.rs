pub(super) fn build_css() -> String {
    r#"* { margin: 0; padding: 0; box-sizing: border-box; }
html, body { width: 100%; height: 100%; background: #0A0A0A; color: #A0A0A0;
  font-family: 'JetBrains Mono', monospace; font-size: 12px; }

/* ── Toolbar ─────────────────────────────────────── */
.toolbar {
  height: 36px; display: flex; align-items: center; padding: 0 14px;
  border-bottom: 1px solid #2A2A2A; font-size: 11px; gap: 10px;
  user-select: none;
}
.toolbar .label { color: #666; }
.toolbar .path { color: #D4AF37; }
.toolbar .badge {
  color: #A0A0A0; background: #1F1F1F; padding: 2px 8px;
  border-radius: 3px; font-size: 10px;
}
.toolbar .sep { color: #333; }
.toolbar .actions { margin-left: auto; display: flex; gap: 6px; }
.toolbar .actions a {
  background: #1F1F1F; border: 1px solid #2A2A2A; color: #A0A0A0;
  padding: 3px 10px; border-radius: 3px; font-size: 10px;
  text-decoration: none;
}
.toolbar .actions a:hover { color: #FFF; border-color: #444; }

/* ── Warnings ────────────────────────────────────── */
.warnings {
  padding: 6px 14px; font-size: 11px; color: #F59E0B;
  background: rgba(245,158,11,0.06); border-bottom: 1px solid #2A2A2A;
}
.warnings div + div { margin-top: 2px; }

/* ── Layout ──────────────────────────────────────── */
.split { display: grid; grid-template-rows: 45% 55%; height: calc(100% - 36px); }
.split.has-warnings { height: calc(100% - 36px - var(--warnings-height)); }
.panel-label {
  font-size: 10px; color: #666; text-transform: uppercase;
  letter-spacing: 0.08em; padding: 6px 14px;
}
.preview-panel { display: flex; flex-direction: column; border-bottom: 1px solid #2A2A2A; }
.preview-panel iframe { flex: 1; width: 100%; border: 0; background: #FFF; }
.code-panels { display: grid; grid-template-columns: 1fr 1fr 0.7fr; min-height: 0; }
.code-panel { display: flex; flex-direction: column; min-height: 0; border-right: 1px solid #2A2A2A; }
.code-panel:last-child { border-right: 0; }
.code-panel pre {
  flex: 1; overflow: auto; padding: 10px 14px; line-height: 1.6;
  color: #C8C8C8; white-space: pre-wrap; word-break: break-word;
}
"#
    .to_string()
}
