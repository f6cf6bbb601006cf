pub fn render_index() -> String {
    INDEX_HTML.to_string()
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Counter Wastage</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f6f1e7;
      --bg-2: #e9d8c0;
      --ink: #2b2a28;
      --accent: #2d8659;
      --accent-2: #2f4858;
      --danger: #cc3333;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.16);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #f4e9d8 60%, #f7f2ea 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      justify-items: center;
      padding: 24px 14px 48px;
      -webkit-user-select: none;
      user-select: none;
    }

    .app {
      width: min(920px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 28px;
      display: grid;
      gap: 22px;
    }

    header {
      display: flex;
      flex-wrap: wrap;
      align-items: baseline;
      justify-content: space-between;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(1.6rem, 4vw, 2.2rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 0.95rem;
    }

    .tabs {
      display: flex;
      gap: 6px;
      padding: 6px;
      background: rgba(47, 72, 88, 0.08);
      border-radius: 999px;
    }

    .tab {
      flex: 1;
      background: transparent;
      border: none;
      border-radius: 999px;
      padding: 10px 14px;
      font-size: 0.95rem;
      font-weight: 600;
      color: #6b645d;
      cursor: pointer;
    }

    .tab.active {
      background: white;
      color: var(--accent-2);
      box-shadow: 0 8px 16px rgba(47, 72, 88, 0.12);
    }

    .view {
      display: none;
    }

    .view.active {
      display: grid;
      gap: 16px;
    }

    .tile-grid {
      display: grid;
      grid-template-columns: repeat(auto-fill, minmax(190px, 1fr));
      gap: 14px;
    }

    .tile {
      background: white;
      border-radius: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      padding: 14px;
      display: grid;
      gap: 10px;
    }

    .tile .name {
      font-weight: 600;
      font-size: 1.02rem;
    }

    .tile .vendor {
      color: #8b857d;
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.1em;
    }

    .tile .row {
      display: flex;
      align-items: center;
      justify-content: space-between;
      gap: 10px;
    }

    .tile .count {
      font-size: 1.8rem;
      font-weight: 600;
      color: var(--accent-2);
      min-width: 2ch;
      text-align: center;
    }

    .tile button {
      appearance: none;
      border: none;
      border-radius: 14px;
      width: 54px;
      height: 48px;
      font-size: 1.4rem;
      font-weight: 600;
      color: white;
      cursor: pointer;
      touch-action: none;
    }

    .tile button:active {
      transform: scale(0.96);
    }

    .tile .plus {
      background: var(--accent);
    }

    .tile .minus {
      background: var(--accent-2);
    }

    .tile button:disabled {
      opacity: 0.35;
      cursor: default;
    }

    .sheet-backdrop {
      position: fixed;
      inset: 0;
      background: rgba(43, 42, 40, 0.45);
      display: none;
      align-items: flex-end;
      justify-content: center;
      z-index: 20;
    }

    .sheet-backdrop.open {
      display: flex;
    }

    .sheet {
      width: min(480px, 100%);
      background: white;
      border-radius: 22px 22px 0 0;
      padding: 20px 18px 28px;
      display: grid;
      gap: 10px;
    }

    .sheet h3 {
      margin: 0 0 4px;
      font-size: 1.05rem;
    }

    .sheet .reason {
      display: flex;
      align-items: center;
      gap: 12px;
      border: none;
      border-radius: 14px;
      padding: 12px 14px;
      font-size: 1rem;
      font-weight: 600;
      cursor: pointer;
      text-align: left;
    }

    .sheet .reason .qty {
      margin-left: auto;
      font-weight: 600;
      opacity: 0.7;
    }

    .log-list {
      display: grid;
      gap: 8px;
    }

    .log-row {
      background: white;
      border-radius: 14px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      padding: 10px 14px;
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .log-row .when {
      color: #8b857d;
      font-size: 0.85rem;
      min-width: 4.5ch;
    }

    .log-row .what {
      flex: 1;
    }

    .log-row .badge {
      border-radius: 999px;
      padding: 3px 10px;
      font-size: 0.8rem;
      font-weight: 600;
    }

    .log-row .del {
      background: transparent;
      border: none;
      color: var(--danger);
      font-size: 1.1rem;
      cursor: pointer;
    }

    .kpis {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(160px, 1fr));
      gap: 12px;
    }

    .kpi {
      background: white;
      border-radius: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      padding: 14px;
      display: grid;
      gap: 6px;
    }

    .kpi .label {
      font-size: 0.8rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .kpi .value {
      font-size: 1.4rem;
      font-weight: 600;
      color: var(--accent-2);
    }

    .bars {
      display: grid;
      gap: 8px;
    }

    .bar-row {
      display: grid;
      grid-template-columns: 140px 1fr 40px;
      align-items: center;
      gap: 10px;
      font-size: 0.92rem;
    }

    .bar-row .bar {
      height: 18px;
      border-radius: 9px;
      background: var(--accent);
      min-width: 4%;
    }

    .bar-row .n {
      text-align: right;
      font-weight: 600;
    }

    .report-section h3 {
      margin: 12px 0 8px;
      font-size: 1.05rem;
    }

    .range {
      display: flex;
      flex-wrap: wrap;
      align-items: center;
      gap: 10px;
    }

    .range input,
    .manage input,
    .manage select {
      border: 1px solid rgba(47, 72, 88, 0.2);
      border-radius: 10px;
      padding: 8px 10px;
      font: inherit;
    }

    .btn {
      appearance: none;
      border: none;
      border-radius: 999px;
      padding: 10px 18px;
      font-weight: 600;
      color: white;
      background: var(--accent-2);
      cursor: pointer;
    }

    .btn.green {
      background: var(--accent);
    }

    .manage form {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
      align-items: center;
    }

    .manage .item-row {
      background: white;
      border-radius: 12px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      padding: 8px 14px;
      display: flex;
      align-items: center;
      gap: 12px;
    }

    .manage .item-row.inactive {
      opacity: 0.5;
    }

    .manage .item-row .what {
      flex: 1;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="ok"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Counter Wastage</h1>
      <p class="subtitle" id="today-label"></p>
    </header>

    <div class="tabs" role="tablist">
      <button class="tab active" type="button" data-tab="log">Log</button>
      <button class="tab" type="button" data-tab="today">Today</button>
      <button class="tab" type="button" data-tab="reports">Reports</button>
      <button class="tab" type="button" data-tab="manage">Manage</button>
    </div>

    <section class="view active" id="view-log">
      <p class="subtitle">Tap + to log one (spoiled). Hold + to pick a reason. Tap - to undo the latest; hold - to undo by reason.</p>
      <div class="tile-grid" id="tile-grid"></div>
    </section>

    <section class="view" id="view-today">
      <div class="log-list" id="log-list"></div>
    </section>

    <section class="view" id="view-reports">
      <div class="range">
        <label>From <input type="date" id="range-start" /></label>
        <label>To <input type="date" id="range-end" /></label>
        <button class="btn" type="button" id="range-apply">Apply</button>
        <a class="btn green" id="csv-link" href="/api/reports/csv" download>Export CSV</a>
      </div>
      <div class="kpis" id="kpis"></div>
      <div class="report-section">
        <h3>By item</h3>
        <div class="bars" id="bars-item"></div>
        <h3>By vendor</h3>
        <div class="bars" id="bars-vendor"></div>
        <h3>By reason</h3>
        <div class="bars" id="bars-reason"></div>
        <h3>By day of week</h3>
        <div class="bars" id="bars-dow"></div>
      </div>
    </section>

    <section class="view manage" id="view-manage">
      <form id="vendor-form">
        <input id="vendor-name" placeholder="New vendor name" required />
        <button class="btn green" type="submit">Add vendor</button>
      </form>
      <form id="item-form">
        <select id="item-vendor" required></select>
        <input id="item-name" placeholder="New item name" required />
        <button class="btn green" type="submit">Add item</button>
      </form>
      <div class="log-list" id="manage-items"></div>
    </section>

    <div class="status" id="status"></div>
  </main>

  <div class="sheet-backdrop" id="sheet-backdrop">
    <div class="sheet" id="sheet"></div>
  </div>

  <script>
    const HOLD_MS = 500;

    const REASONS = [
      { key: 'spoiled', label: 'Spoiled/Expired', glyph: '🤢', color: '#cc3333', bg: '#fde8e8' },
      { key: 'prep_error', label: 'Prep Error', glyph: '🔄', color: '#d4722e', bg: '#fef0e4' },
      { key: 'damaged', label: 'Damaged/Dropped', glyph: '💥', color: '#b85c00', bg: '#fff0dd' },
      { key: 'staff_comp', label: 'Staff Comp', glyph: '👨‍🍳', color: '#2d8659', bg: '#e6f5ed' },
      { key: 'customer_comp', label: 'Customer Comp', glyph: '🎁', color: '#7044c9', bg: '#f0ebfa' },
      { key: 'too_good_to_go', label: '2Good2Go', glyph: '📦', color: '#1a7f9e', bg: '#e4f4f8' },
      { key: 'display_pull', label: 'Display Pull', glyph: '🗄️', color: '#777777', bg: '#f0f0f0' }
    ];
    const DEFAULT_REASON = 'spoiled';
    const DOW_LABELS = ['Sun', 'Mon', 'Tue', 'Wed', 'Thu', 'Fri', 'Sat'];

    const reasonMeta = (key) => REASONS.find((r) => r.key === key) || REASONS[0];

    const statusEl = document.getElementById('status');
    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (message) {
        setTimeout(() => { statusEl.textContent = ''; statusEl.dataset.type = ''; }, 2000);
      }
    };

    const api = async (path, opts) => {
      const res = await fetch(path, opts);
      if (!res.ok) {
        throw new Error(await res.text() || 'Request failed');
      }
      if (res.status === 204) {
        return null;
      }
      return res.json();
    };

    let items = [];
    let todayLogs = [];
    // Server-confirmed counts; only updated after a request succeeds.
    const counts = new Map();

    const breakdown = (itemId) => {
      const byReason = new Map();
      for (const log of todayLogs) {
        if (log.item_id === itemId) {
          byReason.set(log.reason, (byReason.get(log.reason) || 0) + log.quantity);
        }
      }
      return byReason;
    };

    const latestLog = (itemId, reason) => {
      let best = null;
      for (const log of todayLogs) {
        if (log.item_id !== itemId) continue;
        if (reason && log.reason !== reason) continue;
        if (!best || log.id > best.id) best = log;
      }
      return best;
    };

    // -- tiles ------------------------------------------------------------

    const tileGrid = document.getElementById('tile-grid');

    const renderTiles = () => {
      tileGrid.innerHTML = '';
      for (const item of items.filter((i) => i.is_active)) {
        const count = counts.get(item.id) || 0;
        const tile = document.createElement('div');
        tile.className = 'tile';
        tile.innerHTML = `
          <div><div class="name"></div><div class="vendor"></div></div>
          <div class="row">
            <button class="minus" type="button">−</button>
            <span class="count">${count}</span>
            <button class="plus" type="button">+</button>
          </div>
        `;
        tile.querySelector('.name').textContent = item.name;
        tile.querySelector('.vendor').textContent = item.vendor_name;
        const minus = tile.querySelector('.minus');
        minus.disabled = count === 0;
        bindGesture(tile.querySelector('.plus'), item.id, 'inc');
        bindGesture(minus, item.id, 'dec');
        tileGrid.appendChild(tile);
      }
    };

    // Press-and-hold resolution. A press arms a timer; firing it commits
    // the press as a hold, releasing first commits it as a tap. Leaving
    // the button cancels the press outright.
    const bindGesture = (button, itemId, control) => {
      let timer = null;
      let held = false;

      const cancel = () => {
        if (timer !== null) {
          clearTimeout(timer);
          timer = null;
        }
      };

      button.addEventListener('pointerdown', (event) => {
        event.preventDefault();
        if (button.disabled) return;
        held = false;
        cancel();
        timer = setTimeout(() => {
          timer = null;
          held = true;
          onHold(itemId, control);
        }, HOLD_MS);
      });

      button.addEventListener('pointerup', (event) => {
        event.preventDefault();
        if (held) { held = false; return; }
        if (timer === null) return;
        cancel();
        onTap(itemId, control);
      });

      button.addEventListener('pointerleave', () => {
        cancel();
        held = false;
      });
      button.addEventListener('pointercancel', () => {
        cancel();
        held = false;
      });
    };

    const onTap = (itemId, control) => {
      if (control === 'inc') {
        submitLog(itemId, DEFAULT_REASON);
      } else {
        const latest = latestLog(itemId, null);
        if (latest) removeLog(latest, itemId);
      }
    };

    const onHold = (itemId, control) => {
      if (control === 'inc') {
        openSheet(itemId, 'inc');
      } else {
        if (breakdown(itemId).size === 0) return;
        openSheet(itemId, 'dec');
      }
    };

    const submitLog = async (itemId, reason) => {
      try {
        await api('/api/logs', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ item_id: itemId, quantity: 1, reason })
        });
        await refreshToday();
        setStatus(`+1 ${reasonMeta(reason).label}`, 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    const removeLog = async (log, itemId) => {
      try {
        await api(`/api/logs/${log.id}`, { method: 'DELETE' });
        await refreshToday();
        setStatus(`−1 ${reasonMeta(log.reason).label}`, 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    // -- reason sheet -----------------------------------------------------

    const backdrop = document.getElementById('sheet-backdrop');
    const sheet = document.getElementById('sheet');

    const openSheet = (itemId, mode) => {
      const item = items.find((i) => i.id === itemId);
      sheet.innerHTML = '';
      const title = document.createElement('h3');
      title.textContent = mode === 'inc'
        ? `Log waste: ${item ? item.name : ''}`
        : `Remove from: ${item ? item.name : ''}`;
      sheet.appendChild(title);

      let choices;
      if (mode === 'inc') {
        choices = REASONS.map((r) => ({ reason: r, qty: null }));
      } else {
        const byReason = breakdown(itemId);
        choices = REASONS
          .filter((r) => (byReason.get(r.key) || 0) > 0)
          .map((r) => ({ reason: r, qty: byReason.get(r.key) }));
      }

      for (const choice of choices) {
        const btn = document.createElement('button');
        btn.className = 'reason';
        btn.type = 'button';
        btn.style.background = choice.reason.bg;
        btn.style.color = choice.reason.color;
        btn.innerHTML = `<span>${choice.reason.glyph}</span><span>${choice.reason.label}</span>` +
          (choice.qty !== null ? `<span class="qty">${choice.qty}</span>` : '');
        btn.addEventListener('click', () => {
          closeSheet();
          if (mode === 'inc') {
            submitLog(itemId, choice.reason.key);
          } else {
            const latest = latestLog(itemId, choice.reason.key);
            if (latest) removeLog(latest, itemId);
          }
        });
        sheet.appendChild(btn);
      }
      backdrop.classList.add('open');
    };

    const closeSheet = () => backdrop.classList.remove('open');
    backdrop.addEventListener('click', (event) => {
      if (event.target === backdrop) closeSheet();
    });

    // -- today list -------------------------------------------------------

    const logList = document.getElementById('log-list');

    const renderToday = () => {
      logList.innerHTML = '';
      if (!todayLogs.length) {
        logList.innerHTML = '<p class="subtitle">Nothing logged yet today.</p>';
        return;
      }
      for (const log of todayLogs) {
        const meta = reasonMeta(log.reason);
        const row = document.createElement('div');
        row.className = 'log-row';
        row.innerHTML = `
          <span class="when">${log.logged_at.slice(11, 16)}</span>
          <span class="what"></span>
          <span class="badge"></span>
          <button class="del" type="button" title="Delete">✕</button>
        `;
        row.querySelector('.what').textContent =
          `${log.quantity} × ${log.item_name} (${log.vendor_name})`;
        const badge = row.querySelector('.badge');
        badge.textContent = `${meta.glyph} ${meta.label}`;
        badge.style.background = meta.bg;
        badge.style.color = meta.color;
        row.querySelector('.del').addEventListener('click', () => removeLog(log, log.item_id));
        logList.appendChild(row);
      }
    };

    const refreshToday = async () => {
      const [totals, logs] = await Promise.all([
        api('/api/logs/daily-totals'),
        api('/api/logs/today')
      ]);
      counts.clear();
      for (const row of totals) {
        counts.set(row.item_id, row.total_quantity);
      }
      todayLogs = logs;
      renderTiles();
      renderToday();
    };

    // -- reports ----------------------------------------------------------

    const fmtDate = (d) => d.toISOString().slice(0, 10);

    const renderBars = (el, rows, color) => {
      el.innerHTML = '';
      if (!rows.length) {
        el.innerHTML = '<p class="subtitle">No data in range.</p>';
        return;
      }
      const max = rows[0].total || Math.max(...rows.map((r) => r.total));
      for (const row of rows) {
        const pct = max > 0 ? Math.max(4, Math.round((row.total / max) * 100)) : 0;
        const div = document.createElement('div');
        div.className = 'bar-row';
        div.innerHTML = `<span></span><div><div class="bar" style="width:${pct}%"></div></div><span class="n">${row.total}</span>`;
        div.querySelector('span').textContent = row.label;
        if (color) div.querySelector('.bar').style.background = color;
        el.appendChild(div);
      }
    };

    const renderKpis = (report, start, end) => {
      const days = Math.max(1, Math.round((new Date(end) - new Date(start)) / 86400000) + 1);
      const total = report.by_item.reduce((acc, r) => acc + r.total_quantity, 0);
      const avg = total / days;
      const worstItem = report.by_item[0];
      let worstDay = null;
      for (const row of report.by_dow) {
        if (!worstDay || row.total_quantity > worstDay.total_quantity) worstDay = row;
      }
      const kpis = [
        { label: 'Total wasted', value: total },
        { label: 'Daily average', value: avg.toFixed(1) },
        { label: 'Worst item', value: worstItem ? worstItem.item_name : '--' },
        { label: 'Worst day', value: worstDay ? DOW_LABELS[worstDay.dow] : '--' }
      ];
      const el = document.getElementById('kpis');
      el.innerHTML = '';
      for (const kpi of kpis) {
        const div = document.createElement('div');
        div.className = 'kpi';
        div.innerHTML = '<span class="label"></span><span class="value"></span>';
        div.querySelector('.label').textContent = kpi.label;
        div.querySelector('.value').textContent = kpi.value;
        el.appendChild(div);
      }
    };

    const loadReport = async () => {
      const start = document.getElementById('range-start').value;
      const end = document.getElementById('range-end').value;
      if (!start || !end) return;
      try {
        const report = await api(`/api/reports/summary?start_date=${start}&end_date=${end}`);
        renderKpis(report, start, end);
        renderBars(document.getElementById('bars-item'),
          report.by_item.map((r) => ({ label: r.item_name, total: r.total_quantity })));
        renderBars(document.getElementById('bars-vendor'),
          report.by_vendor.map((r) => ({ label: r.vendor_name, total: r.total_quantity })), '#2f4858');
        const reasonBars = document.getElementById('bars-reason');
        reasonBars.innerHTML = '';
        const maxReason = report.by_reason.length ? report.by_reason[0].total_quantity : 0;
        for (const row of report.by_reason) {
          const meta = reasonMeta(row.reason);
          const pct = maxReason > 0 ? Math.max(4, Math.round((row.total_quantity / maxReason) * 100)) : 0;
          const div = document.createElement('div');
          div.className = 'bar-row';
          div.innerHTML = `<span></span><div><div class="bar" style="width:${pct}%"></div></div><span class="n">${row.total_quantity}</span>`;
          div.querySelector('span').textContent = `${meta.glyph} ${meta.label}`;
          div.querySelector('.bar').style.background = meta.color;
          reasonBars.appendChild(div);
        }
        renderBars(document.getElementById('bars-dow'),
          report.by_dow.map((r) => ({ label: DOW_LABELS[r.dow], total: r.total_quantity })), '#7044c9');
        document.getElementById('csv-link').href =
          `/api/reports/csv?start_date=${start}&end_date=${end}`;
      } catch (err) {
        setStatus(err.message, 'error');
      }
    };

    // -- manage -----------------------------------------------------------

    let vendors = [];

    const renderManage = () => {
      const select = document.getElementById('item-vendor');
      select.innerHTML = '';
      for (const vendor of vendors) {
        const opt = document.createElement('option');
        opt.value = vendor.id;
        opt.textContent = vendor.name;
        select.appendChild(opt);
      }
      const list = document.getElementById('manage-items');
      list.innerHTML = '';
      for (const item of items) {
        const row = document.createElement('div');
        row.className = 'item-row' + (item.is_active ? '' : ' inactive');
        row.innerHTML = '<span class="what"></span><button class="btn" type="button"></button>';
        row.querySelector('.what').textContent = `${item.name} — ${item.vendor_name}`;
        const toggle = row.querySelector('button');
        toggle.textContent = item.is_active ? 'Retire' : 'Restore';
        toggle.addEventListener('click', async () => {
          try {
            await api(`/api/items/${item.id}`, {
              method: 'PATCH',
              headers: { 'content-type': 'application/json' },
              body: JSON.stringify({ is_active: !item.is_active })
            });
            await refreshCatalog();
          } catch (err) {
            setStatus(err.message, 'error');
          }
        });
        list.appendChild(row);
      }
    };

    document.getElementById('vendor-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const input = document.getElementById('vendor-name');
      try {
        await api('/api/vendors', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ name: input.value })
        });
        input.value = '';
        await refreshCatalog();
        setStatus('Vendor added', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    document.getElementById('item-form').addEventListener('submit', async (event) => {
      event.preventDefault();
      const name = document.getElementById('item-name');
      const vendorId = Number(document.getElementById('item-vendor').value);
      try {
        await api('/api/items', {
          method: 'POST',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ vendor_id: vendorId, name: name.value })
        });
        name.value = '';
        await refreshCatalog();
        setStatus('Item added', 'ok');
      } catch (err) {
        setStatus(err.message, 'error');
      }
    });

    const refreshCatalog = async () => {
      const [allItems, allVendors] = await Promise.all([
        api('/api/items?active_only=false'),
        api('/api/vendors')
      ]);
      items = allItems;
      vendors = allVendors;
      renderTiles();
      renderManage();
    };

    // -- tabs / boot ------------------------------------------------------

    const tabs = Array.from(document.querySelectorAll('.tab'));
    tabs.forEach((button) => {
      button.addEventListener('click', () => {
        tabs.forEach((b) => b.classList.toggle('active', b === button));
        document.querySelectorAll('.view').forEach((v) => {
          v.classList.toggle('active', v.id === `view-${button.dataset.tab}`);
        });
        if (button.dataset.tab === 'reports') loadReport();
      });
    });

    document.getElementById('range-apply').addEventListener('click', loadReport);

    const boot = async () => {
      const now = new Date();
      document.getElementById('today-label').textContent = now.toDateString();
      const end = fmtDate(now);
      const start = fmtDate(new Date(now.getTime() - 6 * 86400000));
      document.getElementById('range-start').value = start;
      document.getElementById('range-end').value = end;
      await refreshCatalog();
      await refreshToday();
    };

    boot().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;
