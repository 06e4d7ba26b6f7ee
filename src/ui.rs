pub fn render_index() -> &'static str {
    INDEX_HTML
}

const INDEX_HTML: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Gallery Analytics</title>
  <style>
    @import url('https://fonts.googleapis.com/css2?family=Space+Grotesk:wght@400;500;600&family=Fraunces:wght@600&display=swap');

    :root {
      --bg-1: #f8f3e6;
      --bg-2: #d9e3f5;
      --ink: #2b2a28;
      --accent: #2f6fde;
      --accent-2: #c6402f;
      --accent-3: #2d7a4b;
      --card: rgba(255, 255, 255, 0.88);
      --shadow: 0 24px 60px rgba(47, 72, 88, 0.18);
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: radial-gradient(circle at top, var(--bg-2), transparent 60%),
        linear-gradient(135deg, var(--bg-1), #eef1fa 60%, #f9f2e9 100%);
      color: var(--ink);
      font-family: "Space Grotesk", "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 32px 18px 48px;
    }

    .app {
      width: min(980px, 100%);
      background: var(--card);
      backdrop-filter: blur(12px);
      border-radius: 28px;
      box-shadow: var(--shadow);
      padding: 36px;
      display: grid;
      gap: 28px;
    }

    header {
      display: flex;
      flex-direction: column;
      gap: 6px;
    }

    h1 {
      font-family: "Fraunces", "Georgia", serif;
      font-weight: 600;
      font-size: clamp(2rem, 4vw, 2.6rem);
      margin: 0;
    }

    .subtitle {
      margin: 0;
      color: #5f5c57;
      font-size: 1rem;
    }

    .panel {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(180px, 1fr));
      gap: 16px;
    }

    .stat {
      background: white;
      border-radius: 18px;
      padding: 18px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 8px;
    }

    .stat .label {
      font-size: 0.85rem;
      text-transform: uppercase;
      letter-spacing: 0.12em;
      color: #8b857d;
    }

    .stat .value {
      font-size: 1.7rem;
      font-weight: 600;
      color: var(--accent);
    }

    .charts {
      display: grid;
      grid-template-columns: repeat(auto-fit, minmax(280px, 1fr));
      gap: 16px;
    }

    .chart-card {
      background: white;
      border-radius: 20px;
      padding: 16px;
      border: 1px solid rgba(47, 72, 88, 0.08);
      display: grid;
      gap: 10px;
    }

    .chart-card h2 {
      margin: 0;
      font-size: 1.05rem;
    }

    .chart-card svg {
      width: 100%;
      height: 220px;
      display: block;
    }

    .chart-label {
      fill: #7a746d;
      font-size: 10px;
    }

    .chart-grid {
      stroke: rgba(47, 72, 88, 0.12);
    }

    table {
      width: 100%;
      border-collapse: collapse;
      background: white;
      border-radius: 14px;
      overflow: hidden;
    }

    th, td {
      text-align: left;
      padding: 10px 14px;
      border-bottom: 1px solid rgba(47, 72, 88, 0.08);
      font-size: 0.95rem;
    }

    th {
      text-transform: uppercase;
      letter-spacing: 0.08em;
      font-size: 0.78rem;
      color: #8b857d;
    }

    .placeholder {
      color: #8b857d;
      padding: 18px;
      text-align: center;
    }

    .status {
      font-size: 0.95rem;
      color: #6b645d;
      min-height: 1.2em;
    }

    .status[data-type="error"] {
      color: #c63b2b;
    }

    .status[data-type="success"] {
      color: #2d7a4b;
    }
  </style>
</head>
<body>
  <main class="app">
    <header>
      <h1>Gallery Analytics</h1>
      <p class="subtitle">Scans, ratings and dwell time per painting, recomputed on every load.</p>
    </header>

    <section class="panel">
      <div class="stat">
        <span class="label">Total scans</span>
        <span id="total-scans" class="value">--</span>
      </div>
      <div class="stat">
        <span class="label">Total ratings</span>
        <span id="total-ratings" class="value">--</span>
      </div>
      <div class="stat">
        <span class="label">Feedback entries</span>
        <span id="total-feedback" class="value">--</span>
      </div>
      <div class="stat">
        <span class="label">Avg dwell time</span>
        <span id="avg-dwell" class="value">--</span>
      </div>
    </section>

    <div class="status" id="status"></div>

    <section class="charts">
      <div class="chart-card">
        <h2>Scans per painting</h2>
        <svg id="scans-chart" viewBox="0 0 320 220" role="img" aria-label="Scans chart"></svg>
      </div>
      <div class="chart-card">
        <h2>Average rating (0-5)</h2>
        <svg id="ratings-chart" viewBox="0 0 320 220" role="img" aria-label="Ratings chart"></svg>
      </div>
      <div class="chart-card">
        <h2>Average dwell time (sec)</h2>
        <svg id="dwell-chart" viewBox="0 0 320 220" role="img" aria-label="Dwell chart"></svg>
      </div>
    </section>

    <section id="table-container">
      <p class="placeholder">Loading...</p>
    </section>
  </main>

  <script>
    const statusEl = document.getElementById('status');
    const tableContainer = document.getElementById('table-container');

    let statusTimer = null;

    const setStatus = (message, type) => {
      statusEl.textContent = message;
      statusEl.dataset.type = type || '';
      if (statusTimer) {
        clearTimeout(statusTimer);
        statusTimer = null;
      }
      if (type === 'success') {
        statusTimer = setTimeout(() => {
          statusEl.textContent = '';
          statusEl.dataset.type = '';
        }, 3000);
      }
    };

    const escapeHtml = (text) =>
      String(text).replace(/[&<>"']/g, (ch) => ({
        '&': '&amp;',
        '<': '&lt;',
        '>': '&gt;',
        '"': '&quot;',
        "'": '&#39;'
      })[ch]);

    const chartSlot = (id) => {
      const el = document.getElementById(id);
      if (!el) {
        throw new Error('missing chart surface: ' + id);
      }
      return el;
    };

    const renderBarChart = (charts) => {
      const svg = chartSlot('scans-chart');
      const width = 320;
      const height = 220;
      const paddingX = 30;
      const paddingY = 30;
      const max = Math.max(...charts.scan_counts, 1);
      const slot = (width - paddingX * 2) / charts.labels.length;
      const barWidth = Math.min(slot * 0.6, 40);

      let bars = '';
      charts.labels.forEach((label, i) => {
        const value = charts.scan_counts[i];
        const barHeight = (value / max) * (height - paddingY * 2);
        const x = paddingX + i * slot + (slot - barWidth) / 2;
        const y = height - paddingY - barHeight;
        bars += `<rect x="${x.toFixed(1)}" y="${y.toFixed(1)}" width="${barWidth.toFixed(1)}" height="${barHeight.toFixed(1)}" fill="rgba(47, 111, 222, 0.7)" rx="4" />`;
        bars += `<text class="chart-label" x="${(x + barWidth / 2).toFixed(1)}" y="${(y - 5).toFixed(1)}" text-anchor="middle">${value}</text>`;
        bars += `<text class="chart-label" x="${(paddingX + i * slot + slot / 2).toFixed(1)}" y="${height - paddingY + 14}" text-anchor="middle">${escapeHtml(label.slice(0, 10))}</text>`;
      });

      svg.innerHTML = `<line class="chart-grid" x1="${paddingX}" y1="${height - paddingY}" x2="${width - paddingX}" y2="${height - paddingY}" />` + bars;
    };

    const renderLineChart = (charts) => {
      const svg = chartSlot('ratings-chart');
      const width = 320;
      const height = 220;
      const paddingX = 30;
      const paddingY = 30;
      // Rating axis is fixed to the 0-5 scale.
      const min = 0;
      const max = 5;
      const xStep = charts.labels.length > 1
        ? (width - paddingX * 2) / (charts.labels.length - 1)
        : 0;
      const x = (i) => paddingX + i * xStep;
      const y = (value) => height - paddingY - ((value - min) / (max - min)) * (height - paddingY * 2);

      let grid = '';
      for (let tick = min; tick <= max; tick += 1) {
        grid += `<line class="chart-grid" x1="${paddingX}" y1="${y(tick)}" x2="${width - paddingX}" y2="${y(tick)}" />`;
        grid += `<text class="chart-label" x="${paddingX - 8}" y="${y(tick) + 3}" text-anchor="end">${tick}</text>`;
      }

      const path = charts.avg_ratings
        .map((value, i) => `${i === 0 ? 'M' : 'L'} ${x(i).toFixed(1)} ${y(value).toFixed(1)}`)
        .join(' ');
      const points = charts.avg_ratings
        .map((value, i) => `<circle cx="${x(i).toFixed(1)}" cy="${y(value).toFixed(1)}" r="4" fill="white" stroke="rgb(198, 64, 47)" stroke-width="2" />`)
        .join('');
      const labels = charts.labels
        .map((label, i) => `<text class="chart-label" x="${x(i).toFixed(1)}" y="${height - paddingY + 14}" text-anchor="middle">${escapeHtml(label.slice(0, 10))}</text>`)
        .join('');

      svg.innerHTML = `${grid}<path d="${path}" fill="none" stroke="rgb(198, 64, 47)" stroke-width="2" />${points}${labels}`;
    };

    const renderRadarChart = (charts) => {
      const svg = chartSlot('dwell-chart');
      const width = 320;
      const height = 220;
      const cx = width / 2;
      const cy = height / 2;
      const radius = Math.min(width, height) / 2 - 34;
      const max = Math.max(...charts.avg_dwell, 1);
      const count = charts.labels.length;
      const angle = (i) => (Math.PI * 2 * i) / count - Math.PI / 2;

      let spokes = '';
      let labels = '';
      charts.labels.forEach((label, i) => {
        const sx = cx + radius * Math.cos(angle(i));
        const sy = cy + radius * Math.sin(angle(i));
        spokes += `<line class="chart-grid" x1="${cx}" y1="${cy}" x2="${sx.toFixed(1)}" y2="${sy.toFixed(1)}" />`;
        const lx = cx + (radius + 14) * Math.cos(angle(i));
        const ly = cy + (radius + 14) * Math.sin(angle(i));
        labels += `<text class="chart-label" x="${lx.toFixed(1)}" y="${ly.toFixed(1)}" text-anchor="middle">${escapeHtml(label.slice(0, 10))}</text>`;
      });

      const points = charts.avg_dwell
        .map((value, i) => {
          const r = (value / max) * radius;
          const px = cx + r * Math.cos(angle(i));
          const py = cy + r * Math.sin(angle(i));
          return `${px.toFixed(1)},${py.toFixed(1)}`;
        })
        .join(' ');

      const rings = [0.33, 0.66, 1]
        .map((scale) => `<circle class="chart-grid" cx="${cx}" cy="${cy}" r="${(radius * scale).toFixed(1)}" fill="none" />`)
        .join('');

      svg.innerHTML = `${rings}${spokes}<polygon points="${points}" fill="rgba(45, 122, 75, 0.25)" stroke="rgb(45, 122, 75)" stroke-width="2" />${labels}`;
    };

    const renderCharts = (charts) => {
      if (!charts.labels.length) {
        // Nothing to plot; leave every chart surface empty.
        return;
      }
      // Each chart render stands alone: one failure must not take down the
      // other two.
      const renderers = [renderBarChart, renderLineChart, renderRadarChart];
      renderers.forEach((render) => {
        try {
          render(charts);
        } catch (err) {
          console.error('chart render failed:', err);
        }
      });
    };

    const renderTable = (rows) => {
      if (!rows.length) {
        tableContainer.innerHTML = '<p class="placeholder">No data yet</p>';
        return;
      }

      let html = '<table><thead><tr>' +
        '<th>Painting</th><th>Total scans</th><th>Ratings received</th>' +
        '<th>Avg rating</th><th>Avg dwell (sec)</th>' +
        '</tr></thead><tbody>';
      rows.forEach((row) => {
        html += `<tr>
          <td><strong>${escapeHtml(row.name)}</strong></td>
          <td>${row.scan_count}</td>
          <td>${row.rating_count}</td>
          <td>${escapeHtml(row.avg_rating)}</td>
          <td>${escapeHtml(row.avg_dwell)}</td>
        </tr>`;
      });
      html += '</tbody></table>';
      tableContainer.innerHTML = html;
    };

    const renderOverall = (overall) => {
      document.getElementById('total-scans').textContent = overall.total_scans;
      document.getElementById('total-ratings').textContent = overall.total_ratings;
      document.getElementById('total-feedback').textContent = overall.total_feedback;
      document.getElementById('avg-dwell').textContent = overall.avg_dwell_seconds + 's';
    };

    const loadDashboard = async () => {
      setStatus('Loading dashboard...', '');
      const res = await fetch('/api/dashboard');
      if (!res.ok) {
        const msg = await res.text();
        throw new Error(msg || 'Unable to load dashboard');
      }
      const data = await res.json();
      renderOverall(data.overall);
      renderTable(data.table);
      renderCharts(data.charts);
      setStatus('Dashboard loaded', 'success');
    };

    loadDashboard().catch((err) => setStatus(err.message, 'error'));
  </script>
</body>
</html>
"##;
