/// Help screens for both front ends

/// Key bindings of the interactive front end
pub const KEY_HELP: &str = "\
Command list:

    Move:     W - up        A - left     Z - forward
              S - down      D - right    X - backward

    Rotate:   I, K - on X axis
              J, L - on Y axis
              U, O - on Z axis

    Scale:    +, -

    Misc:     R - reset     C - color    P - ortho view
              H - help      Q - quit     T - light

Press ANY key to continue";

/// Syntax of the line front end
pub const LINE_HELP: &str = "\
Command syntax:

    t[axis] [amount] - translate
    r[axis] [amount] - rotate
    s[axis] [amount] - scale
    p - ortho view
    l - light mode
    h - help
    m - reset
    q - quit
    v [width]x[height] - set viewport size

    axis: x, y, z, a - all (scale only)

    amount: float value, the last one is reused when omitted

    Examples: 'tx -0.2' translate on x axis by -0.2
              'ry 90' rotate on y axis by 90 degree
              'sa 0.5' scale all the axis by half
              'v 80x24' set viewport to 80x24 (default)

    Press [Enter] to repeat the last command

Press ENTER to continue";
